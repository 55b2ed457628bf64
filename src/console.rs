//! Console output formatting with ANSI color support.
//!
//! Styled terminal output for the CLI and translation progress, with
//! automatic TTY detection and respect for the NO_COLOR environment
//! variable.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";

/// ANSI style codes used by the console.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Bold,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Red => "31",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Cyan => "36",
        }
    }
}

/// Console output handler with color support detection.
#[derive(Debug)]
pub struct Console {
    colors_enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates a new Console, enabling colors only when stdout is a
    /// terminal and NO_COLOR is unset.
    pub fn new() -> Self {
        Self {
            colors_enabled: std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal(),
        }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
        }
    }

    /// Applies ANSI styles to text if colors are enabled.
    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors_enabled || styles.is_empty() {
            return text.to_string();
        }

        let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    fn label(&self, label: &str, color: Style) -> String {
        format!("[{}]", self.style(label, &[color, Style::Bold]))
    }

    /// Prints an info message with blue `[INFO]` label.
    pub fn info(&self, message: &str) {
        println!("{} {}", self.label("INFO", Style::Blue), message);
    }

    /// Prints a success message with green `[OK]` label.
    pub fn success(&self, message: &str) {
        println!("{} {}", self.label("OK", Style::Green), message);
    }

    /// Prints a warning message with yellow `[WARN]` label.
    pub fn warning(&self, message: &str) {
        println!("{} {}", self.label("WARN", Style::Yellow), message);
    }

    /// Prints an error message with red `[ERROR]` label to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.label("ERROR", Style::Red), message);
    }

    /// Prints a step message with cyan `[STEP]` label.
    pub fn step(&self, message: &str) {
        println!("{} {}", self.label("STEP", Style::Cyan), message);
    }

    /// Prints a section header in magenta bold.
    pub fn section(&self, message: &str) {
        println!();
        println!("{}", self.style(message, &[Style::Magenta, Style::Bold]));
    }

    /// Prints a progress update on the same line, replacing the previous
    /// one.
    pub fn progress_update(&self, message: &str) {
        self.clear_line();
        print!("{} {}", self.label("..", Style::Cyan), message);
        let _ = io::stdout().flush();
    }

    /// Clears the current line (for progress updates).
    pub fn clear_line(&self) {
        if self.colors_enabled {
            print!("\r\x1b[2K");
            let _ = io::stdout().flush();
        } else {
            println!();
        }
    }

    /// Formats a detection outcome like `Arabic (92%)`.
    pub fn detection(&self, label: &str, confidence: f64) -> String {
        self.style(
            &format!("{} ({:.0}%)", label, confidence * 100.0),
            &[Style::Cyan, Style::Bold],
        )
    }

    /// Formats a success rate, green at 100%, yellow otherwise.
    pub fn rate(&self, success_rate: f64) -> String {
        let color = if success_rate >= 100.0 {
            Style::Green
        } else {
            Style::Yellow
        };
        self.style(&format!("{:.0}%", success_rate), &[color, Style::Bold])
    }
}

/// Global console instance for convenience.
pub fn console() -> Console {
    Console::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_disabled() {
        let console = Console::with_colors(false);
        assert_eq!(console.style("hello", &[Style::Red]), "hello");
    }

    #[test]
    fn test_style_enabled() {
        let console = Console::with_colors(true);
        let styled = console.style("hello", &[Style::Red]);
        assert!(styled.contains("\x1b[31m"));
        assert!(styled.contains("hello"));
        assert!(styled.contains(RESET));
    }

    #[test]
    fn test_label_without_colors() {
        let console = Console::with_colors(false);
        assert_eq!(console.label("INFO", Style::Blue), "[INFO]");
    }

    #[test]
    fn test_detection_format() {
        let console = Console::with_colors(false);
        assert_eq!(console.detection("Arabic", 0.9), "Arabic (90%)");
        assert_eq!(console.detection("Arabic (fallback)", 0.3), "Arabic (fallback) (30%)");
    }

    #[test]
    fn test_rate_format() {
        let console = Console::with_colors(false);
        assert_eq!(console.rate(100.0), "100%");
        assert_eq!(console.rate(66.7), "67%");
    }
}

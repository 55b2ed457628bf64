//! Cleanup of joined translation output.
//!
//! Provider output rejoined from chunks tends to carry stray spacing and
//! lowercase sentence starts. The fixes here are idempotent: running the
//! pass twice yields the same text.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RUN_REGEX"));

/// Whitespace directly before closing punctuation.
static SPACE_BEFORE_PUNCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.!?,:;])").expect("Invalid SPACE_BEFORE_PUNCT_REGEX"));

/// A sentence terminator running straight into an uppercase letter.
static TERMINATOR_UPPER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s*([A-Z])").expect("Invalid TERMINATOR_UPPER_REGEX"));

/// Post-processes joined translation output for readability.
///
/// Collapses whitespace runs, removes spaces before punctuation, spaces out
/// sentence terminators followed by an uppercase letter, and capitalizes
/// the first letter of each sentence.
pub fn post_process(text: &str) -> String {
    let collapsed = WHITESPACE_RUN_REGEX.replace_all(text, " ");
    let tightened = SPACE_BEFORE_PUNCT_REGEX.replace_all(&collapsed, "$1");
    let spaced = TERMINATOR_UPPER_REGEX.replace_all(&tightened, "$1 $2");

    let mut out = String::with_capacity(spaced.len());
    for segment in split_keeping_terminators(&spaced) {
        match segment {
            Segment::Terminators(run) => out.push_str(run),
            Segment::Sentence(sentence) => {
                let sentence = sentence.trim();
                if sentence.is_empty() {
                    continue;
                }
                let mut chars = sentence.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
    }

    out.trim().to_string()
}

/// A piece of text split on sentence terminators.
enum Segment<'a> {
    /// Text between terminator runs (possibly blank).
    Sentence(&'a str),
    /// A run of `.`, `!`, or `?`.
    Terminators(&'a str),
}

/// Splits `text` into alternating sentence and terminator-run segments,
/// preserving every character.
fn split_keeping_terminators(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut in_run = false;

    for (idx, ch) in text.char_indices() {
        let is_terminator = matches!(ch, '.' | '!' | '?');
        if is_terminator != in_run {
            if idx > start {
                segments.push(if in_run {
                    Segment::Terminators(&text[start..idx])
                } else {
                    Segment::Sentence(&text[start..idx])
                });
            }
            start = idx;
            in_run = is_terminator;
        }
    }

    if text.len() > start {
        segments.push(if in_run {
            Segment::Terminators(&text[start..])
        } else {
            Segment::Sentence(&text[start..])
        });
    }

    segments
}

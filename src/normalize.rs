//! Source text normalization for Arabic and Urdu tafsir.
//!
//! Cleans raw commentary before detection and translation: whitespace
//! collapsing, Arabic punctuation mapped to ASCII equivalents, Quranic
//! ornament glyphs stripped, and Arabic-Indic digits converted.

use crate::language::Language;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RUN_REGEX"));

/// Runs of the Urdu full stop (۔) collapse to a single occurrence.
static URDU_FULL_STOP_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{06D4}+").expect("Invalid URDU_FULL_STOP_RUN_REGEX"));

/// Normalizes raw tafsir text for the given source language.
///
/// Pure and deterministic. Whitespace runs become single spaces and the
/// ends are trimmed; guillemets become ASCII quotes; the Arabic comma,
/// semicolon, and question mark become their ASCII equivalents; Quranic
/// ornament brackets (﴾﴿) and the verse separator (۞) are removed; and
/// Arabic-Indic digits map positionally onto ASCII digits. Urdu text
/// additionally has repeated full stops collapsed.
pub fn normalize(text: &str, language: Language) -> String {
    let collapsed = WHITESPACE_RUN_REGEX.replace_all(text.trim(), " ");

    let mut out = String::with_capacity(collapsed.len());
    for ch in collapsed.chars() {
        match ch {
            '«' | '»' => out.push('"'),
            '،' => out.push(','),
            '؛' => out.push(';'),
            '؟' => out.push('?'),
            '﴾' | '﴿' | '۞' => {}
            '\u{0660}'..='\u{0669}' => {
                // Arabic-Indic digits are contiguous, so the offset from
                // U+0660 is the digit value.
                let value = (ch as u32 - 0x0660) as u8;
                out.push((b'0' + value) as char);
            }
            _ => out.push(ch),
        }
    }

    if language == Language::Urdu {
        return URDU_FULL_STOP_RUN_REGEX.replace_all(&out, "\u{06D4}").to_string();
    }

    out
}

//! Word-aligned text chunking for translation requests.
//!
//! Long commentary is split into chunks small enough for the translation
//! provider. Splitting never lands inside a word: words are first grouped
//! into bounded sub-units, then sub-units are packed into chunks.

/// Character budget when grouping words into sub-units, below the default
/// chunk limit.
const SUBUNIT_TARGET_CHARS: usize = 3000;

/// Splits `text` into word-aligned chunks of at most `max_chars` characters.
///
/// Text that already fits is returned as a single trimmed chunk. A single
/// word longer than the sub-unit budget is emitted as its own oversized
/// chunk rather than being cut mid-word. Word order is preserved and the
/// chunks partition the word sequence.
///
/// Lengths are counted in characters, not bytes; Arabic script is mostly
/// two bytes per character.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return vec![trimmed.to_string()];
    }

    let subunits = group_words(trimmed);
    pack_subunits(subunits, max_chars)
}

/// Greedily groups whitespace-delimited words into sub-units whose
/// space-joined length stays within the sub-unit budget.
fn group_words(text: &str) -> Vec<String> {
    let mut subunits = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let joined_chars = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if joined_chars <= SUBUNIT_TARGET_CHARS {
            current.push(word);
            current_chars = joined_chars;
        } else if current.is_empty() {
            // A single word over the budget becomes its own sub-unit.
            subunits.push(word.to_string());
        } else {
            subunits.push(current.join(" "));
            current = vec![word];
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        subunits.push(current.join(" "));
    }

    subunits
}

/// Packs sub-units into chunks of at most `max_chars` characters, joining
/// with single spaces. An oversized sub-unit closes the current chunk and
/// is emitted on its own.
fn pack_subunits(subunits: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for unit in subunits {
        let unit_chars = unit.chars().count();
        let joined_chars = if current.is_empty() {
            unit_chars
        } else {
            current_chars + 1 + unit_chars
        };

        if joined_chars > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(&unit);
            current_chars = unit_chars;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&unit);
            current_chars = joined_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds text of `words` five-character words separated by spaces.
    fn synthetic_text(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_into_chunks("  short text  ", 3500);
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn test_empty_text_single_empty_chunk() {
        let chunks = split_into_chunks("", 3500);
        assert_eq!(chunks, vec![String::new()]);
    }

    #[test]
    fn test_long_text_splits_within_limit() {
        // ~5000 characters of 5-char words.
        let text = synthetic_text(850);
        assert!(text.chars().count() > 3500);

        let chunks = split_into_chunks(&text, 3500);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 3500);
        }
    }

    #[test]
    fn test_words_preserved_in_order() {
        let text = (0..1000)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = split_into_chunks(&text, 500);

        let rejoined = chunks.join(" ");
        let original_words: Vec<&str> = text.split_whitespace().collect();
        let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original_words, rejoined_words);
    }

    #[test]
    fn test_chunks_partition_word_sequence() {
        let text = synthetic_text(2000);
        let chunks = split_into_chunks(&text, 1000);

        let total_words: usize = chunks
            .iter()
            .map(|c| c.split_whitespace().count())
            .sum();
        assert_eq!(total_words, 2000);
        // No chunk is empty and none starts or ends mid-word (no partial
        // "lorem" fragments).
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.split_whitespace().all(|w| w == "lorem"));
        }
    }

    #[test]
    fn test_oversized_word_becomes_own_chunk() {
        let giant = "x".repeat(4000);
        let text = format!("{} {} {}", "small", giant, "small");
        let chunks = split_into_chunks(&text, 3500);

        assert!(chunks.iter().any(|c| c.chars().count() > 3500));
        let rejoined_words: Vec<String> = chunks
            .join(" ")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        assert_eq!(rejoined_words, vec!["small".to_string(), giant, "small".to_string()]);
    }

    #[test]
    fn test_boundary_exact_fit() {
        let text = "a".repeat(3500);
        let chunks = split_into_chunks(&text, 3500);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_multibyte_counted_as_chars() {
        // 4000 Arabic characters (8000 bytes) of 4-char words: byte-based
        // counting would split far too eagerly.
        let text = vec!["كلمة"; 800].join(" ");
        let chunks = split_into_chunks(&text, 3500);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 3500);
        }
    }
}

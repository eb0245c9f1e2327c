// ============================================================
// Layer 4: Text Preprocessor
// ============================================================
// Turns free text into words, and word-index sequences into
// fixed-width rows the model can batch.
//
// Word splitting (applied in order):
//   1. Lowercase the whole string
//   2. Replace every character of FILTERS with a space
//   3. Split on ' ' only, dropping empty pieces
//
// \t and \n are in FILTERS; other whitespace such as \r stays
// part of the word it touches.
//
// The apostrophe is deliberately not in FILTERS, so "don't"
// stays a single word.
//
// Padding:
//   Every field has its own fixed width. Shorter sequences are
//   filled with PAD_ID on the right, longer ones lose their tail.
//
//   keyword, width 3:  [5, 12]          → [5, 12, 0]
//   keyword, width 3:  [5, 12, 7, 9]    → [5, 12, 7]
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use serde::{Deserialize, Serialize};

/// Characters stripped from text before splitting into words
pub const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Index written into the unused tail of a padded row
pub const PAD_ID: u32 = 0;

/// Split a raw string into normalised words.
pub fn text_to_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if FILTERS.contains(c) { ' ' } else { c })
        .collect();

    cleaned
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pad on the right with PAD_ID or truncate from the end so the
/// result is exactly `max_len` long.
pub fn pad_sequence(sequence: &[u32], max_len: usize) -> Vec<u32> {
    let mut padded: Vec<u32> = sequence.iter().take(max_len).copied().collect();
    padded.resize(max_len, PAD_ID);
    padded
}

/// Apply `pad_sequence` to every row.
pub fn pad_sequences(sequences: &[Vec<u32>], max_len: usize) -> Vec<Vec<u32>> {
    sequences
        .iter()
        .map(|s| pad_sequence(s, max_len))
        .collect()
}

// ─── Per-field widths ─────────────────────────────────────────────────────────
/// Fixed sequence width for each of the three record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceLengths {
    pub keyword:  usize,
    pub location: usize,
    pub text:     usize,
}

impl Default for SequenceLengths {
    fn default() -> Self {
        Self { keyword: 3, location: 20, text: 100 }
    }
}

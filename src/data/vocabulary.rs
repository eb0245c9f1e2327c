// ============================================================
// Layer 4: Vocabulary
// ============================================================
// Word → index map fitted once on the training file and then
// shared, read-only, by every later encoding step (validation,
// test, submission).
//
// Index layout:
//   0            padding (never assigned to a word)
//   1            <OOV>, returned for any word not seen in fit()
//   2, 3, ...    words, most frequent first; ties keep the
//                order in which the words were first seen
//
// vocab size = number of entries (including <OOV>) + 1 for
// padding, which is the row count of every embedding table.

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::data::preprocessor::text_to_words;

pub const OOV_TOKEN: &str = "<OOV>";
pub const OOV_ID:    u32  = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    word_index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Count words across all `texts` and assign indices by frequency.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        // first-seen order + counts, so the sort below is deterministic
        let mut order:  Vec<String>           = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text_to_words(text.as_ref()) {
                let count = counts.entry(word.clone()).or_insert(0);
                if *count == 0 {
                    order.push(word);
                }
                *count += 1;
            }
        }

        // sort_by_key is stable: equal counts stay in first-seen order
        order.sort_by_key(|w| std::cmp::Reverse(counts[w]));

        let mut word_index = HashMap::with_capacity(order.len() + 1);
        word_index.insert(OOV_TOKEN.to_string(), OOV_ID);
        for (i, word) in order.into_iter().enumerate() {
            word_index.insert(word, OOV_ID + 1 + i as u32);
        }

        tracing::debug!("Vocabulary fitted: {} entries", word_index.len());
        Self { word_index }
    }

    /// Rebuild a vocabulary from a stored word → index map.
    pub fn from_word_index(word_index: HashMap<String, u32>) -> Result<Self> {
        match word_index.get(OOV_TOKEN) {
            Some(&OOV_ID) => {}
            Some(other) => bail!("{OOV_TOKEN} must map to {OOV_ID}, found {other}"),
            None        => bail!("vocabulary has no {OOV_TOKEN} entry"),
        }
        if word_index.values().any(|&id| id == 0) {
            bail!("index 0 is reserved for padding");
        }
        Ok(Self { word_index })
    }

    /// Encode one string; unseen words become OOV_ID.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        text_to_words(text)
            .iter()
            .map(|w| self.word_index.get(w).copied().unwrap_or(OOV_ID))
            .collect()
    }

    /// Encode many strings.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        texts.iter().map(|t| self.encode(t.as_ref())).collect()
    }

    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.word_index.get(word).copied()
    }

    /// Number of embedding rows needed: entries + the padding row.
    pub fn size(&self) -> usize {
        self.word_index.len() + 1
    }

    pub fn word_index(&self) -> &HashMap<String, u32> {
        &self.word_index
    }
}

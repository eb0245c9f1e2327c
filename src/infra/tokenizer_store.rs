// ============================================================
// Layer 6: Tokenizer Store
// ============================================================
// Persists the fitted Vocabulary as a HuggingFace tokenizer.json
// so that evaluation and submission runs encode text with the
// exact word indices the model was trained on.
//
// The file is written in the format Tokenizer::from_file()
// expects: a WordLevel model whose unknown token is <OOV>, with
// a normalizer that lowercases and blanks out the same
// punctuation the preprocessor filters. Loading goes through
// the tokenizers crate, which validates the file, and the word
// map is read back from the parsed tokenizer.

use anyhow::{Context, Result};
use std::{collections::HashMap, path::PathBuf};
use tokenizers::Tokenizer;

use crate::data::preprocessor::PAD_ID;
use crate::data::vocabulary::{Vocabulary, OOV_TOKEN};

const TOKENIZER_FILE: &str = "tokenizer.json";
const PAD_TOKEN:      &str = "<PAD>";

/// Regex form of preprocessor::FILTERS for the tokenizer normalizer
const FILTER_PATTERN: &str = r##"[!"#$%&()*+,\-./:;<=>?@\[\\\]^_`{|}~\t\n]"##;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Write the vocabulary to {dir}/tokenizer.json
    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let mut entries = serde_json::Map::new();
        entries.insert(PAD_TOKEN.to_string(), serde_json::json!(PAD_ID));
        for (word, id) in vocab.word_index() {
            entries.insert(word.clone(), serde_json::json!(id));
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": {
                "type": "Sequence",
                "normalizers": [
                    { "type": "Lowercase" },
                    { "type": "Replace", "pattern": { "Regex": FILTER_PATTERN }, "content": " " }
                ]
            },
            "pre_tokenizer": {
                "type": "Split",
                "pattern": { "String": " " },
                "behavior": "Removed",
                "invert": false
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": entries,
                "unk_token": OOV_TOKEN
            }
        });

        let path = self.path();
        std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::info!(
            "Tokenizer saved with {} entries to '{}'",
            vocab.word_index().len(),
            path.display()
        );
        Ok(())
    }

    /// Load a previously saved vocabulary.
    pub fn load(&self) -> Result<Vocabulary> {
        let path = self.path();
        let tokenizer = Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))?;

        let word_index: HashMap<String, u32> = tokenizer
            .get_vocab(false)
            .into_iter()
            .filter(|(word, _)| word != PAD_TOKEN)
            .collect();

        Vocabulary::from_word_index(word_index)
            .with_context(|| format!("Invalid vocabulary in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::OOV_ID;

    #[test]
    fn test_vocabulary_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path());
        let vocab = Vocabulary::fit(&["Forest fire near La Ronge", "fire! fire!", "don't panic"]);

        store.save(&vocab).unwrap();
        let back = store.load().unwrap();

        assert_eq!(back, vocab);
        assert_eq!(back.size(), vocab.size());
        assert_eq!(back.encode("fire flood"), vec![vocab.index_of("fire").unwrap(), OOV_ID]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TokenizerStore::new(dir.path()).load().is_err());
    }
}

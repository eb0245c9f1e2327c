// ============================================================
// Layer 2: TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the training CSV           (Layer 4 - data)
//   Step 2: Fit the vocabulary              (Layer 4 - data)
//   Step 3: Save the tokenizer              (Layer 6 - infra)
//   Step 4: Split train/validation by rows  (Layer 4 - data)
//   Step 5: Persist the validation rows     (Layer 4 - data)
//   Step 6: Encode + pad both partitions    (Layer 4 - data)
//   Step 7: Save config                     (Layer 6 - infra)
//   Step 8: Run training loop               (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    dataset::{encode_records, TweetDataset},
    loader::{write_records, CsvLoader},
    preprocessor::SequenceLengths,
    splitter::{split_train_val, VALIDATION_FRACTION},
    vocabulary::Vocabulary,
};
use crate::domain::{record::TweetRecord, traits::RecordSource};
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::TextClassificationConfig;
use crate::ml::trainer::run_training;

pub const DEFAULT_TRAIN_CSV:      &str = "data/train.csv";
pub const DEFAULT_TEST_CSV:       &str = "data/test.csv";
pub const DEFAULT_VALIDATION_CSV: &str = "output/validation_data.csv";
pub const DEFAULT_SUBMISSION_CSV: &str = "output/submission.csv";
pub const DEFAULT_MODEL_DIR:      &str = "models";

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything needed to reproduce a run, saved next to the model
// so evaluation can rebuild the same architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_csv:           String,
    pub validation_csv:      String,
    pub model_dir:           String,
    pub lengths:             SequenceLengths,
    pub embedding_dim:       usize,
    pub common_len:          usize,
    pub batch_size:          usize,
    pub epochs:              usize,
    pub learning_rate:       f64,
    pub validation_fraction: f64,
    pub seed:                u64,
    /// Filled in once the vocabulary has been fitted
    pub vocab_size:          usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_csv:           DEFAULT_TRAIN_CSV.to_string(),
            validation_csv:      DEFAULT_VALIDATION_CSV.to_string(),
            model_dir:           DEFAULT_MODEL_DIR.to_string(),
            lengths:             SequenceLengths::default(),
            embedding_dim:       16,
            common_len:          41,
            batch_size:          32,
            epochs:              30,
            learning_rate:       1e-3,
            validation_fraction: VALIDATION_FRACTION,
            seed:                42,
            vocab_size:          0,
        }
    }
}

impl TrainConfig {
    /// Model hyperparameters implied by this run configuration.
    pub fn model_config(&self) -> TextClassificationConfig {
        TextClassificationConfig::new(self.vocab_size)
            .with_keyword_len(self.lengths.keyword)
            .with_location_len(self.lengths.location)
            .with_text_len(self.lengths.text)
            .with_embedding_dim(self.embedding_dim)
            .with_common_len(self.common_len)
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    /// Returns the configuration as saved, with the fitted vocab size.
    pub fn execute(&self) -> Result<TrainConfig> {
        let mut cfg = self.config.clone();
        ensure!(cfg.batch_size > 0, "batch size must be at least 1");

        // ── Step 1: Load the training file ────────────────────────────────────
        tracing::info!("Loading training data from '{}'", cfg.train_csv);
        let records = CsvLoader::labelled(&cfg.train_csv).load_all()?;
        tracing::info!("Loaded {} records", records.len());

        // ── Step 2: Fit vocabulary over text, keyword and location ────────────
        let vocab = fit_vocabulary(&records);
        cfg.vocab_size = vocab.size();
        tracing::info!("Vocabulary size: {}", cfg.vocab_size);

        // ── Step 3: Save tokenizer for later evaluation / submission ──────────
        TokenizerStore::new(&cfg.model_dir).save(&vocab)?;

        // ── Step 4: Split by row order (last rows → validation) ───────────────
        let (train_records, val_records) = split_train_val(records, cfg.validation_fraction);
        tracing::info!(
            "Split: {} train, {} validation",
            train_records.len(),
            val_records.len()
        );
        if val_records.is_empty() {
            tracing::warn!("Validation split is empty; validation metrics will be NaN");
        }

        // ── Step 5: Persist the validation rows ───────────────────────────────
        write_records(Path::new(&cfg.validation_csv), &val_records)?;
        tracing::info!("Validation rows written to '{}'", cfg.validation_csv);

        // ── Step 6: Encode + pad into Burn datasets ───────────────────────────
        let train_dataset = TweetDataset::new(encode_records(&train_records, &vocab, &cfg.lengths));
        let val_dataset   = TweetDataset::new(encode_records(&val_records,   &vocab, &cfg.lengths));
        tracing::debug!(
            "Positive rows: {} train, {} validation",
            train_dataset.positive_count(),
            val_dataset.positive_count()
        );

        // ── Step 7: Save config for inference ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.model_dir)?;
        ckpt_manager.save_config(&cfg)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(&cfg, &cfg.model_config(), train_dataset, val_dataset, &ckpt_manager)?;
        Ok(cfg)
    }
}

/// Fit one shared vocabulary on every text-like field of the training file.
pub fn fit_vocabulary(records: &[TweetRecord]) -> Vocabulary {
    let all_texts: Vec<&str> = records.iter().map(|r| r.text.as_str())
        .chain(records.iter().map(|r| r.keyword.as_str()))
        .chain(records.iter().map(|r| r.location.as_str()))
        .collect();
    Vocabulary::fit(&all_texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_covers_all_fields() {
        let records = vec![
            TweetRecord::new("1", "ablaze", "Birmingham", "Wholesale markets", Some(1)),
            TweetRecord::new("2", "",       "",           "markets calm",      Some(0)),
        ];
        let vocab = fit_vocabulary(&records);
        for word in ["ablaze", "birmingham", "wholesale", "markets", "calm"] {
            assert!(vocab.index_of(word).is_some(), "{word} missing");
        }
        // "markets" is the only repeated word
        assert_eq!(vocab.index_of("markets"), Some(2));
    }

    #[test]
    fn test_zero_batch_size_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            train_csv:  dir.path().join("train.csv").to_string_lossy().into_owned(),
            model_dir:  dir.path().join("models").to_string_lossy().into_owned(),
            batch_size: 0,
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("batch size"));
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_model_config_follows_run_config() {
        let cfg = TrainConfig { vocab_size: 99, ..TrainConfig::default() };
        let m   = cfg.model_config();
        assert_eq!(m.vocab_size, 99);
        assert_eq!((m.keyword_len, m.location_len, m.text_len), (3, 20, 100));
        assert_eq!((m.embedding_dim, m.common_len), (16, 41));
    }
}

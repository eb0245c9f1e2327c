// ============================================================
// Layer 6: Checkpoint Manager
// ============================================================
// Saves and restores the trained model using Burn's gzip-compressed
// named MessagePack recorder at half precision.
//
// What gets saved:
//   1. model.mpk.gz        : all learned parameters, written once
//                            after the last epoch
//   2. train_config.json   : the run configuration, needed to
//                            rebuild the exact architecture
//                            (field widths, embedding size,
//                            vocab size) before loading weights
//
// NamedMpkGzFileRecorder<HalfPrecisionSettings>:
//   - Serialises model parameters to MessagePack format
//   - Stores floats as f16 and gzips the result (".mpk.gz")
//   - Type-safe: loading fails if architecture doesn't match
//
// File layout:
//   models/
//     model.mpk.gz
//     train_config.json
//     tokenizer.json       ← written by TokenizerStore
//     metrics.csv          ← written by MetricsLogger
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{HalfPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::TextClassificationModel;

const MODEL_FILE:  &str = "model";
const CONFIG_FILE: &str = "train_config.json";

type ModelRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;

/// Manages the model artifact and its configuration.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Path handed to the recorder, which appends ".mpk.gz" itself.
    fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// The weights file as it exists on disk.
    pub fn model_file(&self) -> PathBuf {
        self.model_path().with_extension("mpk.gz")
    }

    /// Serialise the model weights to {dir}/model.mpk.gz
    pub fn save_model<B: Backend>(&self, model: &TextClassificationModel<B>) -> Result<()> {
        let path = self.model_path();

        ModelRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save model to '{}'", path.display())
            })?;

        tracing::info!("Model saved to '{}'", self.model_file().display());
        Ok(())
    }

    /// Load saved weights into a freshly initialised model.
    ///
    /// The model parameter must have the architecture the weights
    /// were trained with, or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  TextClassificationModel<B>,
        device: &B::Device,
    ) -> Result<TextClassificationModel<B>> {
        let path = self.model_path();

        let record = ModelRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the run configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the run configuration saved by `save_config`.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }
}

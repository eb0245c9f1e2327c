// ============================================================
// Layer 5: Inferencer
// ============================================================
use anyhow::Result;
use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::{
    batcher::TweetBatcher,
    dataset::encode_records,
    preprocessor::SequenceLengths,
    vocabulary::Vocabulary,
};
use crate::domain::record::TweetRecord;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::evaluator::predict_labels;
use crate::ml::model::TextClassificationModel;
use crate::ml::InnerBackend;

pub struct Inferencer<B: Backend> {
    model:      TextClassificationModel<B>,
    vocab:      Vocabulary,
    lengths:    SequenceLengths,
    batch_size: usize,
    device:     B::Device,
}

impl Inferencer<InnerBackend> {
    /// Rebuild the trained model and vocabulary from a model directory.
    pub fn from_artifacts(model_dir: &str) -> Result<Self> {
        let device: <InnerBackend as Backend>::Device = Default::default();
        let ckpt   = CheckpointManager::new(model_dir)?;
        let cfg    = ckpt.load_config()?;
        let vocab  = TokenizerStore::new(model_dir).load()?;

        anyhow::ensure!(
            vocab.size() == cfg.vocab_size,
            "tokenizer has {} entries but the model was trained with vocab_size={}",
            vocab.size(),
            cfg.vocab_size,
        );

        let model: TextClassificationModel<InnerBackend> = cfg.model_config().init(&device);
        let model = ckpt.load_model(model, &device)?;
        tracing::info!("Model loaded from '{}'", model_dir);

        Ok(Self::new(model, vocab, cfg.lengths, cfg.batch_size, device))
    }
}

impl<B: Backend> Inferencer<B> {
    pub fn new(
        model:      TextClassificationModel<B>,
        vocab:      Vocabulary,
        lengths:    SequenceLengths,
        batch_size: usize,
        device:     B::Device,
    ) -> Self {
        Self { model, vocab, lengths, batch_size: batch_size.max(1), device }
    }

    /// P(disaster) for every record, in input order.
    pub fn predict_probabilities(&self, records: &[TweetRecord]) -> Result<Vec<f32>> {
        let samples = encode_records(records, &self.vocab, &self.lengths);
        let batcher = TweetBatcher::<B>::new(self.device.clone());

        let mut probabilities = Vec::with_capacity(samples.len());
        for chunk in samples.chunks(self.batch_size) {
            let batch = batcher.batch(chunk.to_vec());
            let probs = self.model.forward(batch.keyword, batch.location, batch.text);
            let probs: Vec<f32> = probs
                .into_data()
                .convert::<f32>()
                .to_vec()
                .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;
            probabilities.extend(probs);
        }

        tracing::debug!("Predicted {} records", probabilities.len());
        Ok(probabilities)
    }

    /// Thresholded labels for every record, in input order.
    pub fn predict_labels(&self, records: &[TweetRecord]) -> Result<Vec<u8>> {
        Ok(predict_labels(&self.predict_probabilities(records)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::tests::tiny_config;

    type TestBackend = burn::backend::NdArray;

    fn inferencer(batch_size: usize) -> Inferencer<TestBackend> {
        let vocab   = Vocabulary::fit(&["forest fire near la ronge", "lovely sunny day"]);
        let lengths = SequenceLengths { keyword: 2, location: 3, text: 6 };
        let device  = Default::default();
        let model   = tiny_config(vocab.size()).init::<TestBackend>(&device);
        Inferencer::new(model, vocab, lengths, batch_size, device)
    }

    fn records(n: usize) -> Vec<TweetRecord> {
        (0..n)
            .map(|i| TweetRecord::new(i.to_string(), "", "", format!("forest fire {i}"), None))
            .collect()
    }

    #[test]
    fn test_one_probability_per_record() {
        let probs = inferencer(2).predict_probabilities(&records(5)).unwrap();
        assert_eq!(probs.len(), 5);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_batch_size_does_not_change_predictions() {
        let inf   = inferencer(1);
        let one   = inf.predict_probabilities(&records(4)).unwrap();
        let all   = Inferencer::new(inf.model.clone(), inf.vocab.clone(), inf.lengths, 4, inf.device)
            .predict_probabilities(&records(4))
            .unwrap();
        for (a, b) in one.iter().zip(&all) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_labels_are_binary() {
        let labels = inferencer(3).predict_labels(&records(3)).unwrap();
        assert!(labels.iter().all(|&l| l == 0 || l == 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(inferencer(2).predict_probabilities(&[]).unwrap().is_empty());
    }
}

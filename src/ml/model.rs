use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

use crate::data::batcher::TweetBatch;
use crate::ml::layers::{dot_product_attention, BiGru, BiGruConfig};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally; do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct TextClassificationConfig {
    pub vocab_size:    usize,
    #[config(default = 3)]
    pub keyword_len:   usize,
    #[config(default = 20)]
    pub location_len:  usize,
    #[config(default = 100)]
    pub text_len:      usize,
    #[config(default = 16)]
    pub embedding_dim: usize,
    /// Width every field's length axis is projected to
    #[config(default = 41)]
    pub common_len:    usize,
    #[config(default = 64)]
    pub gru1_hidden:   usize,
    #[config(default = 32)]
    pub gru2_hidden:   usize,
    #[config(default = 16)]
    pub dense_hidden:  usize,
}

impl TextClassificationConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TextClassificationModel<B> {
        let gru1 = BiGruConfig::new(self.embedding_dim, self.gru1_hidden).init(device);
        let gru2 = BiGruConfig::new(gru1.output_size(), self.gru2_hidden).init(device);
        let flat = self.common_len * gru2.output_size();

        TextClassificationModel {
            keyword_embedding:  EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device),
            location_embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device),
            text_embedding:     EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device),
            keyword_dense:      LinearConfig::new(self.keyword_len,  self.common_len).init(device),
            location_dense:     LinearConfig::new(self.location_len, self.common_len).init(device),
            text_dense:         LinearConfig::new(self.text_len,     self.common_len).init(device),
            gru1,
            gru2,
            dense1: LinearConfig::new(flat, self.dense_hidden).init(device),
            dense2: LinearConfig::new(self.dense_hidden, 1).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct TextClassificationModel<B: Backend> {
    pub keyword_embedding:  Embedding<B>,
    pub location_embedding: Embedding<B>,
    pub text_embedding:     Embedding<B>,
    pub keyword_dense:      Linear<B>,
    pub location_dense:     Linear<B>,
    pub text_dense:         Linear<B>,
    pub gru1:               BiGru<B>,
    pub gru2:               BiGru<B>,
    pub dense1:             Linear<B>,
    pub dense2:             Linear<B>,
}

pub struct ClassificationOutput<B: Backend> {
    pub loss:          Tensor<B, 1>,
    /// P(disaster) per record, shape [batch]
    pub probabilities: Tensor<B, 1>,
    pub targets:       Tensor<B, 1, Int>,
}

impl<B: Backend> TextClassificationModel<B> {
    /// keyword [batch, K], location [batch, L], text [batch, T] → logits [batch, 1]
    pub fn forward_logits(
        &self,
        keyword:  Tensor<B, 2, Int>,
        location: Tensor<B, 2, Int>,
        text:     Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        // Embed, then project along the sequence axis: [batch, emb, common_len]
        let keyword  = self.keyword_dense.forward(self.keyword_embedding.forward(keyword).swap_dims(1, 2));
        let location = self.location_dense.forward(self.location_embedding.forward(location).swap_dims(1, 2));
        let text     = self.text_dense.forward(self.text_embedding.forward(text).swap_dims(1, 2));

        // keyword queries, text keys, location values
        let context = dot_product_attention(keyword, location, text).swap_dims(1, 2); // [batch, common_len, emb]

        let x = self.gru1.forward(context);
        let x = dot_product_attention(x.clone(), x.clone(), x);
        let x = self.gru2.forward(x);

        let x: Tensor<B, 2> = x.flatten(1, 2);
        let x = relu(self.dense1.forward(x));
        self.dense2.forward(x)
    }

    /// Probabilities in (0, 1), shape [batch, 1]
    pub fn forward(
        &self,
        keyword:  Tensor<B, 2, Int>,
        location: Tensor<B, 2, Int>,
        text:     Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        sigmoid(self.forward_logits(keyword, location, text))
    }

    /// Forward pass plus binary cross-entropy against the batch targets.
    pub fn forward_classification(&self, batch: TweetBatch<B>) -> ClassificationOutput<B> {
        let logits: Tensor<B, 1> = self
            .forward_logits(batch.keyword, batch.location, batch.text)
            .flatten(0, 1);

        // BCE on logits is the numerically stable form of BCE on sigmoid(logits)
        let loss = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device())
            .forward(logits.clone(), batch.targets.clone());

        ClassificationOutput {
            loss,
            probabilities: sigmoid(logits),
            targets:       batch.targets,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::batcher::TweetBatcher;
    use crate::data::dataset::TweetSample;
    use burn::data::dataloader::batcher::Batcher;

    type TestBackend = burn::backend::NdArray;

    /// Small architecture that keeps tests fast
    pub(crate) fn tiny_config(vocab_size: usize) -> TextClassificationConfig {
        TextClassificationConfig::new(vocab_size)
            .with_keyword_len(2)
            .with_location_len(3)
            .with_text_len(6)
            .with_embedding_dim(4)
            .with_common_len(5)
            .with_gru1_hidden(3)
            .with_gru2_hidden(2)
            .with_dense_hidden(4)
    }

    pub(crate) fn tiny_samples() -> Vec<TweetSample> {
        vec![
            TweetSample { keyword: vec![2, 0], location: vec![3, 0, 0], text: vec![4, 5, 6, 0, 0, 0], target: 1 },
            TweetSample { keyword: vec![0, 0], location: vec![0, 0, 0], text: vec![7, 8, 1, 0, 0, 0], target: 0 },
            TweetSample { keyword: vec![9, 2], location: vec![1, 3, 0], text: vec![4, 9, 9, 9, 9, 9], target: 1 },
        ]
    }

    #[test]
    fn test_forward_shape_and_range() {
        let device  = Default::default();
        let model   = tiny_config(10).init::<TestBackend>(&device);
        let batch   = TweetBatcher::<TestBackend>::new(device).batch(tiny_samples());

        let probs = model.forward(batch.keyword, batch.location, batch.text);
        assert_eq!(probs.dims(), [3, 1]);

        let values: Vec<f32> = probs.into_data().to_vec().unwrap();
        assert!(values.iter().all(|p| *p > 0.0 && *p < 1.0));
    }

    #[test]
    fn test_default_architecture_dimensions() {
        let device = Default::default();
        let model  = TextClassificationConfig::new(50).init::<TestBackend>(&device);
        // 41 steps × 2·32 features after the second BiGRU
        assert_eq!(model.dense1.weight.dims(), [41 * 64, 16]);
        assert_eq!(model.text_dense.weight.dims(), [100, 41]);
        assert_eq!(model.gru1.output_size(), 128);
    }

    #[test]
    fn test_classification_loss_is_finite() {
        let device = Default::default();
        let model  = tiny_config(10).init::<TestBackend>(&device);
        let batch  = TweetBatcher::<TestBackend>::new(device).batch(tiny_samples());

        let out  = model.forward_classification(batch);
        let loss: f32 = out.loss.into_scalar().elem();
        assert!(loss.is_finite() && loss > 0.0);
        assert_eq!(out.probabilities.dims(), [3]);
    }
}

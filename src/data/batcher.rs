// ============================================================
// Layer 4: Tweet Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TweetSample>
// into one tensor per field.
//
//   Input:  N samples, fields of width K (keyword), L (location), T (text)
//   Output: keyword [N, K], location [N, L], text [N, T], targets [N]
//
// Samples are already padded, so each field flattens into one
// contiguous Vec and reshapes straight into [N, width].
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TweetSample;

/// A batch of tweets ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct TweetBatch<B: Backend> {
    pub keyword:  Tensor<B, 2, Int>,
    pub location: Tensor<B, 2, Int>,
    pub text:     Tensor<B, 2, Int>,
    /// Ground-truth labels (0/1), shape [batch_size]
    pub targets:  Tensor<B, 1, Int>,
}

/// Holds the target device so tensors are created where the model lives.
#[derive(Clone, Debug)]
pub struct TweetBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TweetBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Flatten one field of every sample and reshape to [batch, width].
    fn stack_field<F>(&self, items: &[TweetSample], field: F) -> Tensor<B, 2, Int>
    where
        F: Fn(&TweetSample) -> &[u32],
    {
        let width = items.first().map(|s| field(s).len()).unwrap_or(0);
        let flat: Vec<i64> = items
            .iter()
            .flat_map(|s| field(s).iter().map(|&id| id as i64))
            .collect();

        Tensor::<B, 2, Int>::from_data(
            TensorData::new(flat, [items.len(), width]),
            &self.device,
        )
    }
}

impl<B: Backend> Batcher<TweetSample, TweetBatch<B>> for TweetBatcher<B> {
    fn batch(&self, items: Vec<TweetSample>) -> TweetBatch<B> {
        let keyword  = self.stack_field(&items, |s| s.keyword.as_slice());
        let location = self.stack_field(&items, |s| s.location.as_slice());
        let text     = self.stack_field(&items, |s| s.text.as_slice());

        let targets: Vec<i64> = items.iter().map(|s| s.target as i64).collect();
        let targets = Tensor::<B, 1, Int>::from_data(
            TensorData::new(targets, [items.len()]),
            &self.device,
        );

        TweetBatch { keyword, location, text, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn sample(k: [u32; 2], t: [u32; 3], target: u8) -> TweetSample {
        TweetSample { keyword: k.to_vec(), location: vec![0], text: t.to_vec(), target }
    }

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = TweetBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![
            sample([5, 12], [3, 4, 0], 1),
            sample([7, 0],  [9, 0, 0], 0),
        ]);

        assert_eq!(batch.keyword.dims(),  [2, 2]);
        assert_eq!(batch.location.dims(), [2, 1]);
        assert_eq!(batch.text.dims(),     [2, 3]);
        assert_eq!(batch.targets.dims(),  [2]);

        let text: Vec<i64> = batch.text.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(text, vec![3, 4, 0, 9, 0, 0]);
        let targets: Vec<i64> = batch.targets.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(targets, vec![1, 0]);
    }
}

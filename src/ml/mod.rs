// ============================================================
// Layer 5: ML / Model Layer (Burn)
// ============================================================
// All Burn-specific model code lives here.
//
//   layers.rs     : dot-product attention and the bidirectional
//                   GRU built from two Burn GRUs
//
//   model.rs      : the classifier: three embedding branches,
//                   length-axis projection, cross-field attention,
//                   BiGRU → self-attention → BiGRU, dense head
//
//   trainer.rs    : the training loop: forward, BCE loss,
//                   backward, Adam step, accuracy, validation
//
//   evaluator.rs  : 0.5 threshold, confusion matrix,
//                   precision / recall / F1
//
//   inferencer.rs : loads saved artifacts and predicts
//                   probabilities for raw records
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Attention and bidirectional GRU building blocks
pub mod layers;

/// Text classification model architecture
pub mod model;

/// Training loop with per-epoch validation
pub mod trainer;

/// Thresholding and classification metrics
pub mod evaluator;

/// Inference engine: loads artifacts and predicts labels
pub mod inferencer;

/// Backend used for inference and as the autodiff inner backend.
#[cfg(not(feature = "wgpu"))]
pub type InnerBackend = burn::backend::NdArray;

#[cfg(feature = "wgpu")]
pub type InnerBackend = burn::backend::Wgpu;

/// Backend used while training
pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;

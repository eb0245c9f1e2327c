// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Everything a training run leaves on disk, and how later runs
// read it back:
//
//   checkpoint.rs      : model weights (Burn gzip MessagePack recorder)
//                        and the run configuration as JSON
//
//   tokenizer_store.rs : the fitted vocabulary as a
//                        HuggingFace tokenizer.json
//
//   metrics.rs         : per-epoch loss / accuracy CSV
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model weights and run configuration
pub mod checkpoint;

/// Vocabulary persistence
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;

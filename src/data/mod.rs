// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything from the raw CSV files to tensor batches.
//
//   train.csv / test.csv
//       │
//       ▼
//   CsvLoader         → reads rows into TweetRecords
//       │
//       ▼
//   Vocabulary        → fitted once on the training file
//       │
//       ▼
//   Preprocessor      → words → indices → fixed-width rows
//       │
//       ▼
//   Splitter          → first 70% train, last 30% validation
//       │
//       ▼
//   TweetDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   TweetBatcher      → stacks samples into tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads and writes the competition CSV files
pub mod loader;

/// Word splitting and fixed-width padding
pub mod preprocessor;

/// Word → index map with a reserved OOV entry
pub mod vocabulary;

/// Implements Burn's Dataset trait for encoded tweets
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Row-order train/validation split
pub mod splitter;

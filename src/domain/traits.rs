// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The application layer only talks to record sources through
// this trait, so the CSV loader can be swapped for an
// in-memory source in tests without touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::record::TweetRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce tweet records in file order.
///
/// Implementations:
///   - CsvLoader → reads a competition CSV file
pub trait RecordSource {
    /// Load every record from this source, preserving order.
    fn load_all(&self) -> Result<Vec<TweetRecord>>;
}

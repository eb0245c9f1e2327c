// ============================================================
// Layer 4: Train/Validation Splitter
// ============================================================
// Splits the training file into two partitions by row order:
//   - Training set:   the first rows, used to update weights
//   - Validation set: the last floor(fraction * total) rows
//
// There is no shuffle before the split. The validation rows are
// written back to disk and re-read by the evaluator, so they
// must be exactly the tail of the original file. Shuffling for
// training happens later, inside the DataLoader, and only ever
// within the training partition.
//
//   10 rows, fraction 0.3 → 7 train (rows 0..7), 3 validation (rows 7..10)
//
// Reference: Rust Book §8 (Vectors)

/// Fraction of the training file held out for validation
pub const VALIDATION_FRACTION: f64 = 0.3;

/// Number of rows that go to validation for a file of `total` rows.
pub fn validation_size(total: usize, val_fraction: f64) -> usize {
    ((total as f64) * val_fraction).floor() as usize
}

/// Split `samples` into (train, validation), preserving order.
pub fn split_train_val<T>(mut samples: Vec<T>, val_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let val_size = validation_size(total, val_fraction).min(total);
    let split_at = total - val_size;

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_rows() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, VALIDATION_FRACTION);
        assert_eq!(train, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(val,   vec![7, 8, 9]);
    }

    #[test]
    fn test_sizes_follow_floor() {
        for total in 0..200usize {
            let items: Vec<usize> = (0..total).collect();
            let (train, val)      = split_train_val(items, VALIDATION_FRACTION);
            assert_eq!(val.len(), (0.3 * total as f64).floor() as usize);
            assert_eq!(train.len(), total - val.len());
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<usize> = (0..57).collect();
        let (train, val)      = split_train_val(items, VALIDATION_FRACTION);
        let rejoined: Vec<usize> = train.into_iter().chain(val).collect();
        assert_eq!(rejoined, (0..57).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, VALIDATION_FRACTION);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_tiny_dataset_keeps_everything_for_training() {
        // floor(0.3 * 3) = 0
        let (train, val) = split_train_val(vec!['a', 'b', 'c'], VALIDATION_FRACTION);
        assert_eq!(train.len(), 3);
        assert!(val.is_empty());
    }
}

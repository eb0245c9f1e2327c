// ============================================================
// Layer 5: Evaluator
// ============================================================
// Turns predicted probabilities into labels and scores them.
//
//   label = 1  iff  probability > 0.5   (exactly 0.5 → 0)
//
// Metrics are computed from a binary confusion matrix where the
// positive class is "disaster" (target = 1):
//
//   precision = TP / (TP + FP)
//   recall    = TP / (TP + FN)
//   f1        = 2 · precision · recall / (precision + recall)
//
// A ratio whose denominator is zero is reported as 0.0.

use serde::{Deserialize, Serialize};

pub const DECISION_THRESHOLD: f32 = 0.5;

/// Binary decision for one probability.
pub fn predict_label(probability: f32) -> u8 {
    u8::from(probability > DECISION_THRESHOLD)
}

pub fn predict_labels(probabilities: &[f32]) -> Vec<u8> {
    probabilities.iter().map(|&p| predict_label(p)).collect()
}

/// Confusion matrix for the disaster / not-disaster decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp:  usize,
    pub tn:  usize,
    pub fp:  usize,
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn from_labels(truth: &[u8], predicted: &[u8]) -> Self {
        let mut cm = Self::default();
        for (&t, &p) in truth.iter().zip(predicted) {
            cm.record(t == 1, p == 1);
        }
        cm
    }

    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true,  true)  => self.tp  += 1,
            (false, false) => self.tn  += 1,
            (false, true)  => self.fp  += 1,
            (true,  false) => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }
}

/// Scores printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub precision: f64,
    pub recall:    f64,
    pub f1_score:  f64,
    pub accuracy:  f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    pub fn from_confusion(cm: ConfusionMatrix) -> Self {
        let precision = ratio(cm.tp, cm.tp + cm.fp);
        let recall    = ratio(cm.tp, cm.tp + cm.fn_);
        let f1_score  = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        let accuracy = ratio(cm.tp + cm.tn, cm.total());

        Self { precision, recall, f1_score, accuracy, confusion: cm }
    }

    /// Threshold `probabilities` and score them against `truth`.
    pub fn evaluate(truth: &[u8], probabilities: &[f32]) -> Self {
        let predicted = predict_labels(probabilities);
        Self::from_confusion(ConfusionMatrix::from_labels(truth, &predicted))
    }
}

impl std::fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{'precision': {:.4}, 'recall': {:.4}, 'f1_score': {:.4}}}",
            self.precision, self.recall, self.f1_score,
        )
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

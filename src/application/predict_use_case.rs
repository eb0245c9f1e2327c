// ============================================================
// Layer 2: PredictUseCase
// ============================================================
// Uses a trained model directory for the two post-training
// steps of the pipeline:
//
//   evaluate: score a labelled CSV (by default the persisted
//             validation rows) with precision / recall / F1
//   submit:   label an unlabelled CSV and write id,target
//
// Both re-read their input from disk and encode it with the
// vocabulary saved at training time.

use anyhow::Result;
use std::path::Path;

use crate::data::loader::{write_submission, CsvLoader, SubmissionRow};
use crate::domain::traits::RecordSource;
use crate::ml::evaluator::{predict_labels, ClassificationReport};
use crate::ml::inferencer::Inferencer;
use crate::ml::InnerBackend;

pub struct PredictUseCase {
    inferencer: Inferencer<InnerBackend>,
}

impl PredictUseCase {
    /// Load the model, config and tokenizer saved in `model_dir`.
    pub fn from_model_dir(model_dir: &str) -> Result<Self> {
        Ok(Self { inferencer: Inferencer::from_artifacts(model_dir)? })
    }

    /// Score the labelled records in `csv_path`.
    pub fn evaluate(&self, csv_path: &str) -> Result<ClassificationReport> {
        let records = CsvLoader::labelled(csv_path).load_all()?;
        let truth: Vec<u8> = records.iter().filter_map(|r| r.target).collect();

        let probabilities = self.inferencer.predict_probabilities(&records)?;
        let report        = ClassificationReport::evaluate(&truth, &probabilities);

        tracing::info!(
            "Evaluated {} records from '{}': {:?}",
            records.len(),
            csv_path,
            report.confusion,
        );
        Ok(report)
    }

    /// Predict labels for `test_csv` and write them to `output_csv`.
    /// Returns the number of rows written.
    pub fn submit(&self, test_csv: &str, output_csv: &str) -> Result<usize> {
        let records = CsvLoader::new(test_csv).load_all()?;
        let labels  = predict_labels(&self.inferencer.predict_probabilities(&records)?);

        let rows: Vec<SubmissionRow<'_>> = records
            .iter()
            .zip(labels)
            .map(|(r, target)| SubmissionRow { id: &r.id, target })
            .collect();

        write_submission(Path::new(output_csv), &rows)?;
        tracing::info!("Wrote {} predictions to '{}'", rows.len(), output_csv);
        Ok(rows.len())
    }
}

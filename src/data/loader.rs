// ============================================================
// Layer 4: CSV Loader / Writer
// ============================================================
// Reads the competition CSV files into TweetRecords and writes
// the two CSV outputs of the pipeline:
//
//   validation_data.csv   id,keyword,location,text,target
//   submission.csv        id,target
//
// Tweets contain commas, quotes and line breaks, so parsing is
// left to the csv crate rather than splitting lines by hand.
// Columns are matched by header name; a file missing one of the
// required columns is rejected with the column name in the error.
//
// Reference: csv crate documentation (serde integration)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::record::TweetRecord;
use crate::domain::traits::RecordSource;

const REQUIRED_COLUMNS: [&str; 4] = ["id", "keyword", "location", "text"];
const RECORD_HEADER:     [&str; 5] = ["id", "keyword", "location", "text", "target"];
const SUBMISSION_HEADER: [&str; 2] = ["id", "target"];

/// Loads tweet records from one CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path:           PathBuf,
    require_target: bool,
}

impl CsvLoader {
    /// Loader for unlabelled files (the test set)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), require_target: false }
    }

    /// Loader for files that must carry a target column
    pub fn labelled(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), require_target: true }
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<TweetRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot open '{}'", self.path.display()))?;

        let headers = reader.headers()
            .with_context(|| format!("Cannot read header of '{}'", self.path.display()))?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!("'{}' has no '{}' column", self.path.display(), column);
            }
        }
        if self.require_target && !headers.iter().any(|h| h == "target") {
            bail!("'{}' has no 'target' column", self.path.display());
        }

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<TweetRecord>().enumerate() {
            let record = result.with_context(|| {
                format!("Malformed row {} in '{}'", row + 1, self.path.display())
            })?;
            if self.require_target && !record.is_labelled() {
                bail!("Row {} in '{}' has an empty target", row + 1, self.path.display());
            }
            records.push(record);
        }

        tracing::debug!("Loaded {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Write records with the same columns they were read with.
/// The header is written even when `records` is empty.
pub fn write_records(path: &Path, records: &[TweetRecord]) -> Result<()> {
    let mut writer = create_writer(path, &RECORD_HEADER)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} records to '{}'", records.len(), path.display());
    Ok(())
}

/// One row of the submission file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRow<'a> {
    pub id:     &'a str,
    pub target: u8,
}

/// Write `id,target` pairs.
pub fn write_submission(path: &Path, rows: &[SubmissionRow<'_>]) -> Result<()> {
    let mut writer = create_writer(path, &SUBMISSION_HEADER)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Open `path` for writing and emit `header` up front.
/// The csv crate only writes serde headers alongside the first row.
fn create_writer(path: &Path, header: &[&str]) -> Result<csv::Writer<fs::File>> {
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    writer.write_record(header)?;
    Ok(writer)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN_CSV: &str = "\
id,keyword,location,text,target
1,,,Our Deeds are the Reason of this #earthquake May ALLAH Forgive us all,1
4,,,\"Forest fire near La Ronge Sask, Canada\",1
48,ablaze,Birmingham,@bbcmtd Wholesale Markets ablaze,1
62,ablaze,\"Est. September 2012 - Bristol\",We always try to bring the heavy.,0
";

    fn write_fixture(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_reads_quoted_and_empty_fields() {
        let dir     = tempfile::tempdir().unwrap();
        let path    = write_fixture(&dir, "train.csv", TRAIN_CSV);
        let records = CsvLoader::labelled(&path).load_all().unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].keyword, "");
        assert_eq!(records[1].text, "Forest fire near La Ronge Sask, Canada");
        assert_eq!(records[3].location, "Est. September 2012 - Bristol");
        assert_eq!(records[3].target, Some(0));
    }

    #[test]
    fn test_test_file_without_target() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "test.csv",
            "id,keyword,location,text\n0,,,Just happened a terrible car crash\n");
        let records = CsvLoader::new(&path).load_all().unwrap();
        assert_eq!(records[0].id, "0");
        assert_eq!(records[0].target, None);

        // the same file is rejected where labels are required
        assert!(CsvLoader::labelled(&path).load_all().is_err());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "bad.csv", "id,text,target\n1,hello,0\n");
        let err  = CsvLoader::labelled(&path).load_all().unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CsvLoader::new("/definitely/not/here.csv").load_all().is_err());
    }

    #[test]
    fn test_written_records_read_back_identically() {
        let dir     = tempfile::tempdir().unwrap();
        let src     = write_fixture(&dir, "train.csv", TRAIN_CSV);
        let records = CsvLoader::labelled(&src).load_all().unwrap();

        let out = dir.path().join("nested").join("validation.csv");
        write_records(&out, &records[1..]).unwrap();

        let back = CsvLoader::labelled(&out).load_all().unwrap();
        assert_eq!(back, records[1..].to_vec());
    }

    #[test]
    fn test_submission_layout() {
        let dir  = tempfile::tempdir().unwrap();
        let out  = dir.path().join("submission.csv");
        let rows = vec![
            SubmissionRow { id: "0", target: 1 },
            SubmissionRow { id: "2", target: 0 },
        ];
        write_submission(&out, &rows).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "id,target\n0,1\n2,0\n");
    }

    #[test]
    fn test_empty_validation_file_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("validation.csv");
        write_records(&out, &[]).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "id,keyword,location,text,target\n");
        assert!(CsvLoader::labelled(&out).load_all().unwrap().is_empty());
    }

    #[test]
    fn test_empty_submission_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("submission.csv");
        write_submission(&out, &[]).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "id,target\n");
    }

    #[test]
    fn test_unlabelled_record_writes_empty_target() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rows.csv");
        write_records(&out, &[TweetRecord::new("7", "", "", "calm day", None)]).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "id,keyword,location,text,target\n7,,,calm day,\n"
        );
    }
}

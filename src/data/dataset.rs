use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::{pad_sequence, SequenceLengths};
use crate::data::vocabulary::Vocabulary;
use crate::domain::record::TweetRecord;

/// One encoded and padded record.
/// Each field is exactly as long as its configured width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetSample {
    pub keyword:  Vec<u32>,
    pub location: Vec<u32>,
    pub text:     Vec<u32>,
    /// 0 for unlabelled records; ignored at prediction time
    pub target:   u8,
}

impl TweetSample {
    pub fn from_record(record: &TweetRecord, vocab: &Vocabulary, lengths: &SequenceLengths) -> Self {
        Self {
            keyword:  pad_sequence(&vocab.encode(&record.keyword),  lengths.keyword),
            location: pad_sequence(&vocab.encode(&record.location), lengths.location),
            text:     pad_sequence(&vocab.encode(&record.text),     lengths.text),
            target:   record.target.unwrap_or(0),
        }
    }
}

pub fn encode_records(
    records: &[TweetRecord],
    vocab:   &Vocabulary,
    lengths: &SequenceLengths,
) -> Vec<TweetSample> {
    records
        .iter()
        .map(|r| TweetSample::from_record(r, vocab, lengths))
        .collect()
}

pub struct TweetDataset {
    samples: Vec<TweetSample>,
}

impl TweetDataset {
    pub fn new(samples: Vec<TweetSample>) -> Self { Self { samples } }

    pub fn positive_count(&self) -> usize {
        self.samples.iter().filter(|s| s.target == 1).count()
    }
}

impl Dataset<TweetSample> for TweetDataset {
    fn get(&self, index: usize) -> Option<TweetSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::OOV_ID;

    #[test]
    fn test_sample_fields_have_fixed_width() {
        let vocab   = Vocabulary::fit(&["fire", "forest fire near la ronge"]);
        let lengths = SequenceLengths { keyword: 3, location: 4, text: 5 };
        let record  = TweetRecord::new("4", "fire", "", "Forest fire near La Ronge Sask Canada", Some(1));

        let s = TweetSample::from_record(&record, &vocab, &lengths);
        assert_eq!(s.keyword.len(),  3);
        assert_eq!(s.location,       vec![0, 0, 0, 0]);
        assert_eq!(s.text.len(),     5);
        assert_eq!(s.keyword[0],     vocab.index_of("fire").unwrap());
        assert_eq!(s.target,         1);
    }

    #[test]
    fn test_unseen_text_encodes_to_oov() {
        let vocab   = Vocabulary::fit(&["fire"]);
        let lengths = SequenceLengths { keyword: 1, location: 1, text: 3 };
        let record  = TweetRecord::new("9", "", "", "volcano tsunami", None);

        let s = TweetSample::from_record(&record, &vocab, &lengths);
        assert_eq!(s.text, vec![OOV_ID, OOV_ID, 0]);
        assert_eq!(s.target, 0);
    }

    #[test]
    fn test_dataset_access() {
        let vocab   = Vocabulary::fit(&["a b"]);
        let records = vec![
            TweetRecord::new("1", "", "", "a", Some(1)),
            TweetRecord::new("2", "", "", "b", Some(0)),
        ];
        let ds = TweetDataset::new(encode_records(&records, &vocab, &SequenceLengths::default()));
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.positive_count(), 1);
        assert!(ds.get(2).is_none());
    }
}

// ============================================================
// Layer 3: TweetRecord Domain Type
// ============================================================
// One row of the competition CSV files:
//
//   id,keyword,location,text,target
//   1,,,Our Deeds are the Reason of this #earthquake,1
//
// keyword and location are frequently empty. An empty cell is
// read as an empty string so every field can be tokenised the
// same way. The test file carries no target column, so target
// is optional.

use serde::{Deserialize, Serialize};

/// A single tweet with its three text-like fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Identifier carried through to the submission file
    pub id: String,

    #[serde(default)]
    pub keyword: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub text: String,

    /// 1 = real disaster, 0 = not. Absent for the test set.
    #[serde(default)]
    pub target: Option<u8>,
}

impl TweetRecord {
    pub fn new(
        id:       impl Into<String>,
        keyword:  impl Into<String>,
        location: impl Into<String>,
        text:     impl Into<String>,
        target:   Option<u8>,
    ) -> Self {
        Self {
            id:       id.into(),
            keyword:  keyword.into(),
            location: location.into(),
            text:     text.into(),
            target,
        }
    }

    /// True when this record can be used for training or evaluation
    pub fn is_labelled(&self) -> bool {
        self.target.is_some()
    }
}

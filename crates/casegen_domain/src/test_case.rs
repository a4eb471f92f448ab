use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// One action and its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub content: String,
    pub expected: String,
}

/// A structured QA test case.
///
/// Generated records are carried around as raw [`Value`]s and only converted
/// into this shape by consumers that need the fields, so a record that passed
/// cleanup can still fail here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub title: String,
    pub custom_preconds: String,
    /// Kept as emitted; no export reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<Value>,
    pub custom_steps_separated: Vec<Step>,
}

impl TestCase {
    /// Converts the raw record at `index` of a batch.
    pub fn from_record(index: usize, record: &Value) -> Result<Self> {
        serde_json::from_value(record.clone())
            .map_err(|source| Error::MalformedRecord { index, source })
    }

    /// Converts a whole batch, failing on the first malformed record.
    pub fn from_records(records: &[Value]) -> Result<Vec<Self>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| Self::from_record(index, record))
            .collect()
    }
}

/// Whether a raw record carries the minimum shape of a test case: an object
/// with a `title` key.
pub fn is_valid_record(record: &Value) -> bool {
    record.as_object().is_some_and(|map| map.contains_key("title"))
}

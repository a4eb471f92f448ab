use casegen_domain::is_valid_record;
use serde_json::Value;
use tracing::debug;

/// Keeps the records that are objects with a `title` key, in their original
/// order. Nothing else is checked or normalized.
pub fn cleanup(records: impl IntoIterator<Item = Value>) -> Vec<Value> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if is_valid_record(&record) {
                Some(record)
            } else {
                debug!(index, "Dropping record without a title");
                None
            }
        })
        .collect()
}

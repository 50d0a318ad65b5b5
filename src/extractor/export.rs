//! Flattening of extracted records into rows for a persistence layer.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One flat, string-keyed row per record.
pub type Row = BTreeMap<String, String>;

/// Convert serializable records to ordered rows. Nested values are kept as
/// their JSON text; nulls become empty strings.
pub fn to_rows<T: Serialize>(records: &[T]) -> serde_json::Result<Vec<Row>> {
    records
        .iter()
        .map(|record| -> serde_json::Result<Row> {
            let value = serde_json::to_value(record)?;
            Ok(match value {
                Value::Object(fields) => fields
                    .into_iter()
                    .map(|(key, value)| (key, cell(value)))
                    .collect(),
                other => BTreeMap::from([("value".to_string(), cell(other))]),
            })
        })
        .collect()
}

fn cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

//! Column Inferencer
//!
//! Derives one display column per distinct field key in a record sequence.

use hashlink::LinkedHashSet;
use serde_json::Value;

use super::column::Column;

/// Infer columns from `records`.
///
/// Keys are the union over all object records, in first-seen order. Returns `None`
/// when there are no records or the first one is not an object; later non-object
/// records are skipped.
pub fn infer_columns(records: &[Value]) -> Option<Vec<Column>> {
    if !records.first()?.is_object() {
        return None;
    }

    let mut keys: LinkedHashSet<&str> = LinkedHashSet::new();
    for record in records.iter().filter_map(Value::as_object) {
        for key in record.keys() {
            // re-inserting would move the key to the back
            if !keys.contains(key.as_str()) {
                keys.insert(key.as_str());
            }
        }
    }

    Some(keys.into_iter().map(Column::inferred).collect())
}

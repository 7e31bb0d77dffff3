//! Record - Flattened Business Objects
//!
//! Records are schema-less: an ordered map from field name to a JSON value.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One business object extracted from a page
pub type Record = Map<String, Value>;

/// Resolve a dotted key-path inside `value`.
///
/// An empty path yields `value` itself. Segments index objects by key and arrays by
/// position. Any missing segment yields `None`.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Check that a value can be shown as a table.
///
/// Arrays pass (element shapes are the inferencer's business) and `null` counts as
/// no data. Anything else is reported with the caller's incorrect-format message.
pub fn ensure_table(value: &Value, message: &str) -> Result<()> {
    match value {
        Value::Array(_) | Value::Null => Ok(()),
        _ => Err(Error::IncorrectFormat {
            message: message.to_string(),
        }),
    }
}

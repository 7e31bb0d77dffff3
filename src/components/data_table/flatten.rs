//! Result Flattener
//!
//! Turns the accumulated pages of one query into a single ordered record sequence.

use serde_json::Value;

use crate::domain::{resolve_path, Page};

/// Concatenate the payload found at `data_key` in every page.
///
/// Page order and within-page order are preserved. A page where the path does not
/// resolve contributes nothing. A resolved array contributes its elements, any other
/// resolved value contributes itself.
pub fn flatten_pages(pages: &[Page], data_key: &str) -> Vec<Value> {
    pages
        .iter()
        .flat_map(|page| match resolve_path(page.body(), data_key) {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => {
                tracing::trace!(data_key, "Page has no payload at key path");
                Vec::new()
            }
        })
        .collect()
}

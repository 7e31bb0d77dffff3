//! Export
//!
//! CSV and JSON export of the visible columns.

use std::io::Write;

use serde_json::{Map, Value};

use super::column::Column;
use super::visibility::{is_visible, VisibilityMap};
use crate::error::Result;

fn visible<'a>(columns: &'a [Column], visibility: &'a VisibilityMap) -> impl Iterator<Item = &'a Column> {
    columns.iter().filter(|c| is_visible(visibility, &c.id))
}

/// Write visible columns as CSV: one header row of labels, one row per record
pub fn export_csv<W: Write>(
    writer: W,
    columns: &[Column],
    visibility: &VisibilityMap,
    records: &[Value],
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let shown: Vec<&Column> = visible(columns, visibility).collect();

    csv.write_record(shown.iter().map(|c| c.label.as_str()))?;
    for record in records {
        csv.write_record(shown.iter().map(|c| c.render_cell(record)))?;
    }
    csv.flush()?;

    tracing::debug!(rows = records.len(), columns = shown.len(), "Exported CSV");
    Ok(())
}

/// Export visible columns as a JSON array of objects keyed by column identifier.
///
/// Raw values are kept; columns missing from a record are `null`.
pub fn export_json(columns: &[Column], visibility: &VisibilityMap, records: &[Value]) -> Value {
    let shown: Vec<&Column> = visible(columns, visibility).collect();
    let rows = records
        .iter()
        .map(|record| {
            let object: Map<String, Value> = shown
                .iter()
                .map(|c| (c.id.clone(), c.value(record).cloned().unwrap_or(Value::Null)))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

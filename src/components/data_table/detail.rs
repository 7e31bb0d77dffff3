//! Detail Panel
//!
//! Side-panel content for one selected record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{resolve_path, Record};
use crate::utils::format::format_cell;

/// A field listed in the detail panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtendedInfoField {
    /// Dotted path into the record
    pub name: String,
    /// Label; defaults to the path
    #[serde(default)]
    pub label: Option<String>,
}

impl ExtendedInfoField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }
}

/// Detail panel configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OffCanvasConfig {
    #[serde(default)]
    pub extended_info_fields: Vec<ExtendedInfoField>,
}

/// One label/value line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub label: String,
    pub value: String,
}

/// Detail panel populated from a single record
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// Index of the record in the flattened sequence
    pub row: usize,
    pub record: Record,
    pub entries: Vec<DetailEntry>,
}

impl DetailPanel {
    /// Build the panel. Without configured fields every top-level field is listed;
    /// fields missing from the record are skipped.
    pub fn build(row: usize, record: &Record, fields: &[ExtendedInfoField]) -> Self {
        let entries = if fields.is_empty() {
            record
                .iter()
                .map(|(key, value)| DetailEntry {
                    label: key.clone(),
                    value: format_cell(value),
                })
                .collect()
        } else {
            let root = Value::Object(record.clone());
            fields
                .iter()
                .filter_map(|field| {
                    let value = record
                        .get(&field.name)
                        .or_else(|| resolve_path(&root, &field.name))?;
                    Some(DetailEntry {
                        label: field.label.clone().unwrap_or_else(|| field.name.clone()),
                        value: format_cell(value),
                    })
                })
                .collect()
        };

        Self {
            row,
            record: record.clone(),
            entries,
        }
    }
}

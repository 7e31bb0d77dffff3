//! Column Definition
//!
//! Defines grid columns with their properties and cell renderers.

use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{resolve_path, Record};
use crate::utils::format::format_cell;

/// Custom cell renderer
pub type CellRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Where a column came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrigin {
    /// Supplied by the caller
    Explicit,
    /// Derived from the record keys
    Inferred,
}

/// Column width specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Fixed(f32),
    /// Flexible width with optional min/max
    Flex { min: Option<f32>, max: Option<f32> },
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex { min: None, max: None }
    }
}

/// Column definition for the grid
#[derive(Clone)]
pub struct Column {
    /// Column identifier, unique within a grid
    pub id: String,
    /// Column header label
    pub label: String,
    /// Dotted path of the value inside a record
    pub accessor: String,
    pub width: ColumnWidth,
    pub origin: ColumnOrigin,
    render: Option<CellRenderer>,
}

impl Column {
    /// Create an explicit column reading `id` from each record
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: id.clone(),
            id,
            label: label.into(),
            width: ColumnWidth::default(),
            origin: ColumnOrigin::Explicit,
            render: None,
        }
    }

    /// Create a column for a key discovered in the data
    pub fn inferred(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            label: key.clone(),
            accessor: key,
            width: ColumnWidth::default(),
            origin: ColumnOrigin::Inferred,
            render: None,
        }
    }

    /// Read the cell value from a different path than the identifier
    pub fn accessor(mut self, path: impl Into<String>) -> Self {
        self.accessor = path.into();
        self
    }

    /// Set fixed width
    pub fn fixed_width(mut self, width: f32) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set flexible width with optional constraints
    pub fn flex_width(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.width = ColumnWidth::Flex { min, max };
        self
    }

    /// Render cells with a custom function
    pub fn render_with(mut self, render: impl Fn(&Record) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Raw value of this column in `row`. A top-level key wins over a dotted path.
    pub fn value<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        row.get(&self.accessor)
            .or_else(|| resolve_path(row, &self.accessor))
    }

    /// Render a cell as text
    pub fn render_cell(&self, row: &Value) -> String {
        match (&self.render, row.as_object()) {
            (Some(render), Some(record)) => render(record),
            _ => self.value(row).map(format_cell).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("accessor", &self.accessor)
            .field("origin", &self.origin)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

/// Column as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    /// Identifier; falls back to `header` when absent
    #[serde(default)]
    pub id: Option<String>,
    pub header: String,
    /// Dotted path of the value; defaults to the identifier
    #[serde(default)]
    pub accessor_key: Option<String>,
    #[serde(default)]
    pub width: Option<ColumnWidth>,
}

impl ColumnSpec {
    pub fn identifier(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.header)
    }
}

impl From<&ColumnSpec> for Column {
    fn from(spec: &ColumnSpec) -> Self {
        let id = spec.identifier().to_string();
        let accessor = spec.accessor_key.clone().unwrap_or_else(|| id.clone());
        let mut column = Column::new(id, spec.header.clone()).accessor(accessor);
        if let Some(width) = spec.width {
            column.width = width;
        }
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_cell_default_and_custom() {
        let row = json!({ "name": "Alice", "licenses": ["E3", "E5"], "mail": { "primary": "a@x" } });

        assert_eq!(Column::inferred("name").render_cell(&row), "Alice");
        assert_eq!(Column::inferred("licenses").render_cell(&row), "E3, E5");
        assert_eq!(Column::inferred("missing").render_cell(&row), "");
        assert_eq!(
            Column::new("mail", "Mail").accessor("mail.primary").render_cell(&row),
            "a@x"
        );

        let shout = Column::new("name", "Name").render_with(|r| {
            r.get("name").and_then(Value::as_str).unwrap_or_default().to_uppercase()
        });
        assert_eq!(shout.render_cell(&row), "ALICE");
    }

    #[test]
    fn test_spec_identifier_fallback() {
        let spec = ColumnSpec {
            header: "Display Name".into(),
            ..Default::default()
        };
        let column = Column::from(&spec);
        assert_eq!(column.id, "Display Name");
        assert_eq!(column.accessor, "Display Name");
        assert_eq!(column.origin, ColumnOrigin::Explicit);

        let spec = ColumnSpec {
            id: Some("upn".into()),
            header: "UPN".into(),
            accessor_key: Some("userPrincipalName".into()),
            width: Some(ColumnWidth::Fixed(240.0)),
        };
        let column = Column::from(&spec);
        assert_eq!(column.id, "upn");
        assert_eq!(column.accessor, "userPrincipalName");
        assert_eq!(column.width, ColumnWidth::Fixed(240.0));
    }
}

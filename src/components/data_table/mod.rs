//! DataTable Logic
//!
//! Column inference, visibility resolution, flattening and export for the grid.
//! Nothing here depends on GPUI.

pub mod column;
pub mod data_provider;
pub mod detail;
pub mod export;
pub mod flatten;
pub mod infer;
pub mod table_mode;
pub mod visibility;

pub use column::{CellRenderer, Column, ColumnOrigin, ColumnSpec, ColumnWidth};
pub use data_provider::{DataProvider, RecordProvider};
pub use detail::{DetailEntry, DetailPanel, ExtendedInfoField, OffCanvasConfig};
pub use export::{export_csv, export_json};
pub use flatten::flatten_pages;
pub use infer::infer_columns;
pub use table_mode::TableMode;
pub use visibility::{
    default_visibility, is_visible, resolve_columns, Resolution, ResolveMode, VisibilityMap,
};

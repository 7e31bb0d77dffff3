//! Domain - Pure Data Structures
//!
//! These types don't depend on GPUI and describe pages, records and row actions.

pub mod action;
pub mod page;
pub mod record;

pub use action::{ActionField, ActionRequest, FieldKind, HttpMethod, RowAction};
pub use page::{Page, PageMetadata, PageRequest};
pub use record::{ensure_table, resolve_path, Record};

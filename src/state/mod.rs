//! State - Grid Controller and Query Cache
//!
//! Unidirectional flow:
//!
//! ```text
//! UI Action → DataGrid method → spawn Pager → PagerEvent → QueryCache → derived state → GridView
//! ```

pub mod action_form;
pub mod grid;
pub mod query_cache;
pub mod view;

pub use action_form::ActionForm;
pub use grid::DataGrid;
pub use query_cache::{FetchStatus, LoadError, QueryCache, QueryEntry};
pub use view::{ActionView, ColumnView, ErrorBanner, GridView, PresentationShell};

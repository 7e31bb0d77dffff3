//! Service Layer
//!
//! Network access and background work: the pager, the HTTP client and the tokio
//! bridge. Results travel to the state layer as [`PagerEvent`]s.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 tokio runtime                 │
//! │  ┌───────────┐    ┌────────────────────────┐  │
//! │  │   Pager   │───►│ PageSource (HTTP, ...) │  │
//! │  └───────────┘    └────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//!            │
//!            ▼ PagerEvent (crossbeam channel)
//! ┌──────────────────────────────────────────────┐
//! │         State Layer (QueryCache, DataGrid)    │
//! └──────────────────────────────────────────────┘
//! ```

mod events;
mod http;
mod pager;
mod runtime;

pub use events::*;
pub use http::*;
pub use pager::*;
pub use runtime::*;

#[cfg(test)]
pub(crate) use pager::testing;

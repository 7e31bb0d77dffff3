//! Console Grid Library
//!
//! A data grid for administration consoles: it pages through an HTTP collection
//! endpoint, infers table columns from the JSON it receives, and hands a view model
//! to a presentation shell (a native GPUI one ships behind the `shell` feature).

pub mod components;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(feature = "shell")]
pub mod shell;

pub use config::{ApiConfig, GridConfig};
pub use error::{Error, Result};
pub use state::{DataGrid, GridView, PresentationShell};

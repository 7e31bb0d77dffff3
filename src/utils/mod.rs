//! Utilities
//!
//! Small helpers shared by the grid, the exporters and the shell.

pub mod format;

//! Shell - Native GPUI Presentation
//!
//! Only built with the `shell` feature.

pub mod application;
pub mod colors;
pub mod grid_view;

pub use grid_view::GridPage;

//! Components
//!
//! Grid building blocks shared by the controller and the presentation shell.

pub mod data_table;

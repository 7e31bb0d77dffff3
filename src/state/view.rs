//! GridView - What the Presentation Shell Consumes
//!
//! A snapshot of everything needed to draw the grid. Shells never reach into the
//! controller; they receive a fresh view whenever something changed.

use std::sync::Arc;

use crate::components::data_table::{ColumnWidth, DetailPanel, RecordProvider, TableMode};
use crate::domain::RowAction;
use crate::state::query_cache::FetchStatus;

/// Column as the shell sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub id: String,
    pub label: String,
    pub width: ColumnWidth,
    pub visible: bool,
}

/// Fetch failure shown with a reload affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    /// Earlier pages are still shown
    pub during_continuation: bool,
}

/// Entry of the per-row action menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    /// Index into the configured actions
    pub index: usize,
    pub label: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl ActionView {
    pub fn from_actions(actions: &[RowAction]) -> Vec<ActionView> {
        actions
            .iter()
            .enumerate()
            .map(|(index, action)| ActionView {
                index,
                label: action.label.clone(),
                icon: action.icon.clone(),
                color: action.color.clone(),
            })
            .collect()
    }
}

/// Snapshot handed to the presentation shell
#[derive(Debug, Clone)]
pub struct GridView {
    pub title: Arc<str>,
    pub mode: TableMode,
    pub columns: Vec<ColumnView>,
    pub rows: RecordProvider,
    pub status: FetchStatus,
    /// Transient loading indicator
    pub show_skeleton: bool,
    pub error: Option<ErrorBanner>,
    /// Shown in place of an empty table (queue message of the first page)
    pub empty_message: Option<String>,
    /// Set when the data is not an array; replaces the table
    pub incorrect_format: Option<String>,
    pub actions: Vec<ActionView>,
    pub detail: Option<DetailPanel>,
}

impl GridView {
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnView> {
        self.columns.iter().filter(|c| c.visible)
    }
}

/// Rendering collaborator: receives a view whenever the grid changed
pub trait PresentationShell {
    fn present(&mut self, view: &GridView);
}

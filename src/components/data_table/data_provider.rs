//! DataProvider Trait
//!
//! Row access for virtualized rendering: the shell asks only for the rows it draws.

use std::ops::Range;
use std::sync::Arc;

use serde_json::Value;

/// Trait for providing rows to a virtualized table
pub trait DataProvider: Send + Sync + 'static {
    type Row: Clone + Send + Sync + 'static;

    /// Get the total number of rows
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index
    fn row(&self, index: usize) -> Option<Self::Row>;

    /// Get the rows in a range, clamped to the available rows
    fn rows(&self, range: Range<usize>) -> Vec<Self::Row> {
        let end = range.end.min(self.len());
        (range.start.min(end)..end).filter_map(|i| self.row(i)).collect()
    }
}

/// Shared, immutable snapshot of the flattened records
#[derive(Debug, Clone, Default)]
pub struct RecordProvider {
    records: Arc<Vec<Value>>,
}

impl RecordProvider {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Create from a shared reference
    pub fn from_arc(records: Arc<Vec<Value>>) -> Self {
        Self { records }
    }

    /// Get all rows
    pub fn all(&self) -> &[Value] {
        &self.records
    }

    pub fn shared(&self) -> Arc<Vec<Value>> {
        Arc::clone(&self.records)
    }
}

impl DataProvider for RecordProvider {
    type Row = Value;

    fn len(&self) -> usize {
        self.records.len()
    }

    fn row(&self, index: usize) -> Option<Self::Row> {
        self.records.get(index).cloned()
    }
}

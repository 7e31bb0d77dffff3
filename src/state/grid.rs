//! DataGrid - Grid Controller
//!
//! Owns configuration, the query cache and the derived record/column/visibility
//! state. Follows the same flow as the rest of the state layer:
//!
//! ```text
//! UI Action → DataGrid method → spawn Pager → PagerEvent → poll() → derived state → GridView
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde_json::Value;

use super::query_cache::{FetchStatus, QueryCache, QueryEntry};
use super::view::{ActionView, ColumnView, ErrorBanner, GridView};
use crate::components::data_table::{
    export_csv, export_json, flatten_pages, infer_columns, is_visible, resolve_columns, Column,
    DetailPanel, RecordProvider, TableMode, VisibilityMap,
};
use crate::config::GridConfig;
use crate::domain::{ensure_table, ActionRequest};
use crate::error::{Error, Result};
use crate::services::{
    spawn_named_in_tokio, HttpPageSource, PageSource, Pager, PagerEvent, QueryKey,
};
use crate::utils::format::export_file_name;

/// Inputs whose size change triggers column recomputation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shape {
    records: usize,
    explicit: usize,
    key: QueryKey,
}

/// Grid controller
pub struct DataGrid<S: PageSource = HttpPageSource> {
    config: GridConfig,
    source: Arc<S>,
    key: QueryKey,
    cache: QueryCache,
    /// Generation the current pager must match to keep running
    live: Arc<AtomicU64>,
    tx: Sender<PagerEvent>,
    rx: Receiver<PagerEvent>,
    explicit_columns: Vec<Column>,
    records: Arc<Vec<Value>>,
    incorrect_format: Option<String>,
    columns: Vec<Column>,
    visibility: VisibilityMap,
    last_shape: Option<Shape>,
    mode: TableMode,
    detail: Option<DetailPanel>,
    external_fetching: bool,
}

impl DataGrid<HttpPageSource> {
    /// Grid reading its endpoint over HTTP
    pub fn with_http(config: GridConfig) -> Result<Self> {
        let source = HttpPageSource::new(config.client.clone())?;
        Self::new(config, source)
    }
}

impl<S: PageSource> DataGrid<S> {
    /// Build the grid and start fetching when an endpoint is configured; otherwise
    /// show the static fallback data.
    pub fn new(config: GridConfig, source: S) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = crossbeam_channel::unbounded();
        let explicit_columns = config.columns.iter().map(Column::from).collect();
        let mode = TableMode::derive(
            config.simple,
            !config.actions.is_empty(),
            config.off_canvas.is_some(),
            config.export_enabled,
        );

        let mut grid = Self {
            key: config.query_key(),
            visibility: config.initial_visibility(),
            source: Arc::new(source),
            cache: QueryCache::default(),
            live: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            explicit_columns,
            records: Arc::new(Vec::new()),
            incorrect_format: None,
            columns: Vec::new(),
            last_shape: None,
            mode,
            detail: None,
            external_fetching: false,
            config,
        };

        if let Some(data) = grid.config.data.clone() {
            grid.load_data(data);
        }
        if grid.config.api.is_some() {
            grid.start_query(false);
        }
        grid.recompute_columns();
        Ok(grid)
    }

    // ==================== Getters ====================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query_key(&self) -> &QueryKey {
        &self.key
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn entry(&self) -> Option<&QueryEntry> {
        self.cache.get(&self.key)
    }

    pub fn status(&self) -> FetchStatus {
        self.entry()
            .map(|e| e.status().clone())
            .unwrap_or_default()
    }

    pub fn is_fetching(&self) -> bool {
        self.entry().is_some_and(QueryEntry::is_fetching)
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    // ==================== Query lifecycle ====================

    fn start_query(&mut self, keep_previous: bool) {
        let Some(request) = self.config.first_request() else {
            return;
        };

        let generation = self.cache.begin(&self.key, keep_previous);
        self.live.store(generation, Ordering::SeqCst);

        let pager = Pager::new(
            Arc::clone(&self.source),
            self.key.clone(),
            generation,
            Arc::clone(&self.live),
            self.tx.clone(),
        );
        tracing::info!(key = %self.key, url = %request.url, generation, "Starting query");
        spawn_named_in_tokio("pager", async move {
            pager.run(request).await;
        });
    }

    /// Switch to another query key: the old key's pages are dropped and pagination
    /// restarts from the first page.
    pub fn set_query_key(&mut self, key: impl Into<QueryKey>) {
        let key = key.into();
        if key == self.key {
            return;
        }

        self.cache.invalidate(&self.key);
        tracing::info!(from = %self.key, to = %key, "Query key changed");
        self.key = key;
        self.detail = None;

        if self.config.api.is_some() {
            self.records = Arc::new(Vec::new());
            self.start_query(false);
        }
        self.recompute_columns();
    }

    /// Manual reload of the current query; also the retry affordance after an error.
    /// Returns false when there is no endpoint to reload.
    pub fn refresh(&mut self) -> bool {
        if self.config.api.is_none() {
            return false;
        }
        self.start_query(true);
        true
    }

    /// Mark an outside fetch in progress (shows the loading indicator)
    pub fn set_external_fetching(&mut self, fetching: bool) {
        self.external_fetching = fetching;
    }

    // ==================== Events ====================

    /// Apply pending pager events. Returns whether the grid changed.
    pub fn poll(&mut self) -> bool {
        let events: Vec<PagerEvent> = self.rx.try_iter().collect();
        self.apply_events(events)
    }

    /// Wait up to `timeout` for the next pager event, then apply everything pending
    pub fn poll_timeout(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => {
                let mut events = vec![first];
                events.extend(self.rx.try_iter());
                self.apply_events(events)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn apply_events(&mut self, events: Vec<PagerEvent>) -> bool {
        let mut touched = false;
        for event in events {
            let current = *event.key() == self.key;
            if self.cache.apply(event) && current {
                touched = true;
            }
        }
        if touched {
            self.sync_records();
        }
        touched
    }

    /// Re-flatten the current key's pages
    fn sync_records(&mut self) {
        let Some(entry) = self.cache.get(&self.key) else {
            return;
        };
        if entry.pages().is_empty() && entry.status() != &FetchStatus::Success {
            return;
        }

        let records = flatten_pages(entry.pages(), self.config.data_key());
        if records.iter().any(|record| !record.is_object()) {
            tracing::warn!(key = %self.key, "Fetched data is not a collection of objects");
            self.incorrect_format = Some(self.config.incorrect_data_message.clone());
            self.records = Arc::new(Vec::new());
            return;
        }

        tracing::debug!(key = %self.key, records = records.len(), "Records updated");
        self.records = Arc::new(records);
        self.incorrect_format = None;
        self.recompute_columns();
    }

    // ==================== Data & columns ====================

    fn load_data(&mut self, data: Value) {
        match ensure_table(&data, &self.config.incorrect_data_message) {
            Ok(()) => {
                self.incorrect_format = None;
                self.records = Arc::new(match data {
                    Value::Array(items) => items,
                    _ => Vec::new(),
                });
            }
            Err(Error::IncorrectFormat { message }) => {
                tracing::warn!(key = %self.key, "Static data is not an array");
                self.incorrect_format = Some(message);
                self.records = Arc::new(Vec::new());
            }
            Err(other) => tracing::error!("Unexpected data check failure: {}", other),
        }
    }

    /// Replace the record set with caller data. Only a non-empty array that differs
    /// from the current records is taken. Returns whether it was applied.
    pub fn set_static_data(&mut self, data: Value) -> bool {
        let Value::Array(items) = &data else {
            return false;
        };
        if items.is_empty() || items.as_slice() == self.records.as_slice() {
            return false;
        }
        self.load_data(data);
        self.recompute_columns();
        true
    }

    /// Replace the caller-supplied columns
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.explicit_columns = columns;
        self.recompute_columns();
    }

    /// User toggle of a column
    pub fn set_column_visibility(&mut self, id: &str, visible: bool) {
        self.visibility.insert(id.to_string(), visible);
    }

    /// Recompute columns when the record count, explicit column count or key changed.
    /// Leaves columns and visibility alone when nothing can be inferred.
    fn recompute_columns(&mut self) {
        let shape = Shape {
            records: self.records.len(),
            explicit: self.explicit_columns.len(),
            key: self.key.clone(),
        };
        if self.last_shape.as_ref() == Some(&shape) {
            return;
        }
        self.last_shape = Some(shape);

        let Some(inferred) = infer_columns(&self.records) else {
            return;
        };
        let resolution = resolve_columns(
            &self.explicit_columns,
            &self.config.simple_columns,
            inferred,
            &self.visibility,
        );
        tracing::debug!(
            mode = ?resolution.mode,
            columns = resolution.columns.len(),
            "Columns resolved"
        );
        self.columns = resolution.columns;
        self.visibility = resolution.visibility;
    }

    // ==================== Row actions & detail ====================

    fn record(&self, row: usize) -> Option<&serde_json::Map<String, Value>> {
        self.records.get(row).and_then(Value::as_object)
    }

    /// Open the detail panel for a row. Returns `None` when the panel is disabled or
    /// the row is not an object.
    pub fn open_detail(&mut self, row: usize) -> Option<&DetailPanel> {
        let fields = &self.config.off_canvas.as_ref()?.extended_info_fields;
        let panel = DetailPanel::build(row, self.record(row)?, fields);
        self.detail = Some(panel);
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Bind the configured action `action` to `row` for confirmation
    pub fn prepare_action(&self, row: usize, action: usize) -> Option<ActionRequest> {
        let action = self.config.actions.get(action)?;
        Some(action.prepare(self.record(row)?))
    }

    /// Call after a mutation succeeded; refreshes when the action relates to this
    /// grid's query (no related keys means this grid).
    pub fn action_completed(&mut self, request: &ActionRequest) -> bool {
        let related = request.related_query_keys.is_empty()
            || request
                .related_query_keys
                .iter()
                .any(|k| k.as_str() == self.key.as_str());
        related && self.refresh()
    }

    // ==================== Export ====================

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        export_csv(writer, &self.columns, &self.visibility, &self.records)
    }

    pub fn export_json(&self) -> Value {
        export_json(&self.columns, &self.visibility, &self.records)
    }

    /// Suggested file name for an export taken today
    pub fn export_file_name(&self, extension: &str) -> String {
        export_file_name(&self.config.title, Local::now().date_naive(), extension)
    }

    // ==================== View ====================

    /// Snapshot for the presentation shell
    pub fn view(&self) -> GridView {
        let entry = self.entry();
        let status = self.status();

        let error = entry.and_then(QueryEntry::error).map(|err| ErrorBanner {
            message: format!("Error Loading data: {}", err.message),
            during_continuation: err.during_continuation,
        });

        let empty_message = entry
            .and_then(|e| e.pages().first())
            .and_then(|page| page.metadata().queue_message);

        let has_pages = entry.is_some_and(|e| !e.pages().is_empty());
        let show_skeleton =
            self.external_fetching || (status == FetchStatus::Pending && !has_pages);

        GridView {
            title: self.config.title.as_str().into(),
            mode: self.mode,
            columns: self
                .columns
                .iter()
                .map(|c| ColumnView {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    width: c.width,
                    visible: is_visible(&self.visibility, &c.id),
                })
                .collect(),
            rows: RecordProvider::from_arc(Arc::clone(&self.records)),
            status,
            show_skeleton,
            error,
            empty_message,
            incorrect_format: self.incorrect_format.clone(),
            actions: ActionView::from_actions(&self.config.actions),
            detail: self.detail.clone(),
        }
    }
}

impl<S: PageSource> std::fmt::Debug for DataGrid<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .field("columns", &self.columns.len())
            .field("status", &self.status())
            .finish()
    }
}

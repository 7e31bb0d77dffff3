//! Grid Constants
//!
//! Defaults shared by the configuration, the pager and the shell.

/// Title used when the caller does not give one (also the fallback query key)
pub const DEFAULT_TITLE: &str = "Report";

/// Message shown when data is not an array of objects
pub const DEFAULT_INCORRECT_DATA_MESSAGE: &str = "Data not in correct format";

/// Columns hidden until the caller or the resolver says otherwise
pub const DEFAULT_HIDDEN_COLUMNS: [&str; 6] = [
    "id",
    "RowKey",
    "ETag",
    "PartitionKey",
    "Timestamp",
    "TableTimestamp",
];

/// Top-level key holding pagination metadata in each page
pub const METADATA_KEY: &str = "Metadata";
/// Continuation indicator inside the metadata object
pub const NEXT_LINK_KEY: &str = "nextLink";
/// Optional status message inside the metadata object
pub const QUEUE_MESSAGE_KEY: &str = "QueueMessage";
/// Key carrying the human-readable outcome of a mutation
pub const RESULTS_KEY: &str = "Results";

/// Number of query keys kept in the cache
pub const QUERY_CACHE_CAPACITY: usize = 32;

/// HTTP request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Interval at which the shell drains pager events
pub const POLL_INTERVAL_MS: u64 = 50;

/// Row and header heights in pixels
pub const ROW_HEIGHT: f32 = 36.0;
pub const HEADER_HEIGHT: f32 = 40.0;

/// Default column width in pixels
pub const COLUMN_WIDTH: f32 = 160.0;

/// Detail panel width in pixels
pub const DETAIL_PANEL_WIDTH: f32 = 360.0;

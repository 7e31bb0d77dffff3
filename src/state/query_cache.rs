//! QueryCache - Accumulated Pages per Query Key
//!
//! Explicit replacement for a data-fetching library's global cache. Each key owns its
//! pages and fetch status; a generation counter tells current events from stale ones.

use std::sync::Arc;

use hashlink::LruCache;

use crate::domain::Page;
use crate::services::{PagerEvent, QueryKey};

/// Fetch status of a query
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// A fetch failure kept alongside the partial result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub message: Arc<str>,
    /// The failure hit a continuation request; earlier pages are intact
    pub during_continuation: bool,
}

/// Cached state of one query
#[derive(Clone, Debug, Default)]
pub struct QueryEntry {
    pages: Vec<Page>,
    status: FetchStatus,
    error: Option<LoadError>,
    generation: u64,
    /// Set while refreshing: old pages stay visible until the first new one lands
    replace_on_next_page: bool,
}

impl QueryEntry {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Still expecting pages
    pub fn is_fetching(&self) -> bool {
        self.status == FetchStatus::Pending
    }
}

/// Bounded map from query key to its accumulated pages
pub struct QueryCache {
    entries: LruCache<QueryKey, QueryEntry>,
    next_generation: u64,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity.max(1)),
            next_generation: 1,
        }
    }

    /// Start a new fetch generation for `key` and return it.
    ///
    /// With `keep_previous`, existing pages stay until the first page of the new
    /// generation replaces them.
    pub fn begin(&mut self, key: &QueryKey, keep_previous: bool) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        let previous = self.entries.remove(key);
        let (pages, replace_on_next_page) = match previous {
            Some(entry) if keep_previous => (entry.pages, true),
            _ => (Vec::new(), false),
        };

        self.entries.insert(
            key.clone(),
            QueryEntry {
                pages,
                status: FetchStatus::Pending,
                error: None,
                generation,
                replace_on_next_page,
            },
        );
        tracing::debug!(key = %key, generation, keep_previous, "Query generation started");
        generation
    }

    /// Apply a pager event. Events for unknown keys or older generations are
    /// dropped; returns whether the entry changed.
    pub fn apply(&mut self, event: PagerEvent) -> bool {
        let Some(entry) = self.entries.get_mut(event.key()) else {
            tracing::trace!(key = %event.key(), "Dropping event for evicted query");
            return false;
        };
        if entry.generation != event.generation() {
            tracing::trace!(
                key = %event.key(),
                stale = event.generation(),
                current = entry.generation,
                "Dropping stale event"
            );
            return false;
        }

        match event {
            PagerEvent::PageLoaded { page, .. } => {
                if entry.replace_on_next_page {
                    entry.pages.clear();
                    entry.replace_on_next_page = false;
                }
                entry.pages.push(page);
            }
            PagerEvent::Finished { .. } => {
                if entry.replace_on_next_page {
                    entry.pages.clear();
                    entry.replace_on_next_page = false;
                }
                entry.status = FetchStatus::Success;
            }
            PagerEvent::Failed {
                message,
                during_continuation,
                ..
            } => {
                entry.replace_on_next_page = false;
                entry.status = FetchStatus::Error;
                entry.error = Some(LoadError {
                    message,
                    during_continuation,
                });
            }
        }
        true
    }

    pub fn get(&self, key: &QueryKey) -> Option<&QueryEntry> {
        self.entries.peek(key)
    }

    /// Drop everything cached for `key`
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(crate::constants::QUERY_CACHE_CAPACITY)
    }
}

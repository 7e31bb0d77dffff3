//! Service Events
//!
//! Events emitted by the pager to be consumed by the grid state.

use std::sync::Arc;

use crate::domain::Page;

/// Identity of one logical query
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct QueryKey(pub Arc<str>);

impl QueryKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QueryKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QueryKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events emitted by a running pager
#[derive(Clone, Debug)]
pub enum PagerEvent {
    /// A page arrived
    PageLoaded {
        key: QueryKey,
        generation: u64,
        page: Page,
    },

    /// The last page reported no continuation
    Finished { key: QueryKey, generation: u64 },

    /// A request failed; pagination stopped
    Failed {
        key: QueryKey,
        generation: u64,
        message: Arc<str>,
        /// True when earlier pages were already delivered
        during_continuation: bool,
    },
}

impl PagerEvent {
    pub fn key(&self) -> &QueryKey {
        match self {
            PagerEvent::PageLoaded { key, .. }
            | PagerEvent::Finished { key, .. }
            | PagerEvent::Failed { key, .. } => key,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            PagerEvent::PageLoaded { generation, .. }
            | PagerEvent::Finished { generation, .. }
            | PagerEvent::Failed { generation, .. } => *generation,
        }
    }
}

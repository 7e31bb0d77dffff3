//! Pager
//!
//! Follows continuation links until the collection is exhausted, reporting every
//! page over a channel.
//!
//! ## Pattern
//!
//! ```text
//! fetch page N ──► PageLoaded ──► continuation? ──yes──► fetch page N+1
//!                                      │
//!                                      no ──► Finished
//! any error ──► Failed (pagination stops, delivered pages stay)
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use super::events::{PagerEvent, QueryKey};
use crate::domain::{Page, PageRequest};
use crate::error::Result;

/// Source of pages for a collection endpoint
pub trait PageSource: Send + Sync + 'static {
    fn fetch_page(&self, request: &PageRequest) -> impl Future<Output = Result<Page>> + Send;
}

/// One run of pagination for one query key
pub struct Pager<S> {
    source: Arc<S>,
    key: QueryKey,
    generation: u64,
    /// Generation currently wanted by the owner; any other value stops this run
    live: Arc<AtomicU64>,
    tx: Sender<PagerEvent>,
}

impl<S: PageSource> Pager<S> {
    pub fn new(
        source: Arc<S>,
        key: QueryKey,
        generation: u64,
        live: Arc<AtomicU64>,
        tx: Sender<PagerEvent>,
    ) -> Self {
        Self {
            source,
            key,
            generation,
            live,
            tx,
        }
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst) == self.generation
    }

    fn emit(&self, event: PagerEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Fetch pages starting at `first`. Returns the number of pages delivered.
    pub async fn run(self, first: PageRequest) -> usize {
        let mut request = first;
        let mut fetched = 0;

        loop {
            if !self.is_live() {
                tracing::debug!(key = %self.key, generation = self.generation, "Pager abandoned");
                return fetched;
            }

            match self.source.fetch_page(&request).await {
                Ok(page) => {
                    fetched += 1;
                    let next = request.next_after(&page);
                    tracing::debug!(
                        key = %self.key,
                        page = fetched,
                        more = next.is_some(),
                        "Page loaded"
                    );

                    let delivered = self.emit(PagerEvent::PageLoaded {
                        key: self.key.clone(),
                        generation: self.generation,
                        page,
                    });
                    if !delivered {
                        return fetched;
                    }

                    match next {
                        Some(next) => request = next,
                        None => {
                            self.emit(PagerEvent::Finished {
                                key: self.key.clone(),
                                generation: self.generation,
                            });
                            tracing::info!(key = %self.key, pages = fetched, "Query complete");
                            return fetched;
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(key = %self.key, page = fetched + 1, "Page fetch failed: {}", err);
                    self.emit(PagerEvent::Failed {
                        key: self.key.clone(),
                        generation: self.generation,
                        message: err.to_string().into(),
                        during_continuation: fetched > 0,
                    });
                    return fetched;
                }
            }
        }
    }
}

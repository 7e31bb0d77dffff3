//! Tokio Runtime Bridge
//!
//! The grid state lives on the UI thread (GPUI's executor or a plain loop), while
//! reqwest requires tokio. Pagers are spawned here and talk back over channels.
//!
//! ## Pattern
//!
//! ```text
//! DataGrid::start_query
//!       │
//!       ▼
//! spawn_named_in_tokio(pager.run(..))
//!       │
//!       ▼
//! PagerEvent ──channel──► DataGrid::poll
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

/// Worker threads for pagers and mutations
const IO_WORKERS: usize = 2;

static IO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn get_runtime() -> &'static Runtime {
    IO_RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(IO_WORKERS)
            .thread_name("console-grid-io")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Execute a future in the tokio runtime and wait for the result
///
/// Used for one-shot calls such as row-action mutations.
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = get_runtime().spawn(future);
    match handle.await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    get_runtime().spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    });
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Use only from the headless binary or
/// outside of any async context.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

//! Logging - tracing Subscriber Setup
//!
//! Console output filtered by `RUST_LOG` (default `info`), plus an optional daily
//! rolling file under the platform data directory.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

/// Directory for log files, e.g. `~/.local/share/console-grid/logs`
pub fn log_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "console-grid", "console-grid").ok_or_else(|| {
        Error::Invalid {
            message: "Could not determine data directory".into(),
        }
    })?;
    Ok(dirs.data_local_dir().join("logs"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

/// Initialize logging. Keep the returned guard alive to flush the file writer.
///
/// Logs go to stderr so stdout stays free for exports.
pub fn init(to_file: bool) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339());

    if !to_file {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(console)
            .init();
        return Ok(None);
    }

    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::daily(&dir, "console-grid.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    tracing::info!("Logging to {}", dir.display());
    Ok(Some(guard))
}

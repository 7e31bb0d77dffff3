//! Console Grid - Main Entry Point
//!
//! `console-grid [--schema] [--log-file] <config.toml>`
//!
//! Opens the GPUI grid when built with the `shell` feature; otherwise fetches every
//! page and writes the CSV export to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console_grid::config::GridConfig;

#[derive(Parser)]
#[command(name = "console-grid")]
#[command(about = "Paginated data grid for admin console endpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// Print the configuration JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// Also write logs to a daily rolling file
    #[arg(long)]
    log_file: bool,

    /// Grid configuration (TOML)
    #[arg(required_unless_present = "schema")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.schema {
        let schema = GridConfig::json_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let _guard = console_grid::logging::init(cli.log_file)?;
    tracing::info!("Starting Console Grid...");

    let path = cli.config.context("No configuration file given")?;
    let config = GridConfig::load(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    run(config)
}

#[cfg(feature = "shell")]
fn run(config: GridConfig) -> Result<()> {
    console_grid::shell::application::run_app(config);
    Ok(())
}

#[cfg(not(feature = "shell"))]
fn run(config: GridConfig) -> Result<()> {
    use std::time::Duration;

    use anyhow::bail;
    use console_grid::state::{DataGrid, FetchStatus, GridView, PresentationShell};

    /// Reports progress on the log while pages arrive
    struct LogShell;

    impl PresentationShell for LogShell {
        fn present(&mut self, view: &GridView) {
            tracing::info!(
                title = %view.title,
                rows = view.rows.all().len(),
                columns = view.visible_columns().count(),
                status = ?view.status,
                "Grid updated"
            );
        }
    }

    let mut grid = DataGrid::with_http(config)?;
    let mut shell = LogShell;
    shell.present(&grid.view());

    while grid.is_fetching() {
        if grid.poll_timeout(Duration::from_millis(250)) {
            shell.present(&grid.view());
        }
    }

    let view = grid.view();
    if let Some(message) = &view.incorrect_format {
        bail!("{message}");
    }
    if let Some(error) = &view.error {
        if grid.status() == FetchStatus::Error && !error.during_continuation {
            bail!("{}", error.message);
        }
        tracing::warn!("{} (exporting partial results)", error.message);
    }
    if view.rows.all().is_empty() {
        if let Some(message) = &view.empty_message {
            tracing::info!("{message}");
        }
    }

    grid.export_csv(std::io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["console-grid", "--log-file", "grid.toml"]).expect("args");
        assert!(cli.log_file);
        assert!(!cli.schema);
        assert_eq!(cli.config, Some(PathBuf::from("grid.toml")));

        let cli = Cli::try_parse_from(["console-grid", "--schema"]).expect("schema only");
        assert!(cli.schema);
        assert!(cli.config.is_none());

        assert!(Cli::try_parse_from(["console-grid"]).is_err());
        assert!(Cli::try_parse_from(["console-grid", "--bogus", "grid.toml"]).is_err());
    }
}

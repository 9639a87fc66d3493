//! kcdb-search CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kcdb_search::cli::{SearchCommand, SearchOptions};
use kcdb_search::config::Config;
use kcdb_search::datastore::CatalogDatastore;
use kcdb_search::error::{exit_codes, SearchError};

// =============================================================================
// CLI Definition
// =============================================================================

/// Search the footprint catalog
#[derive(Parser)]
#[command(name = "kcdb-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search footprints, e.g. `soic pc=8 attr=smd`
    Search {
        /// Search query (keywords plus pin_count=/attr= filters)
        query: String,
        /// Catalog file to search (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
        /// Request timeout in milliseconds, 0 for none (overrides config)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("kcdb-search error: {}", e);
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<i32, SearchError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            catalog,
            limit,
            timeout_ms,
            json,
            quiet,
        } => run_search(&query, catalog, timeout_ms, SearchOptions { json, quiet, limit }),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn run_search(
    query: &str,
    catalog: Option<PathBuf>,
    timeout_ms: Option<u64>,
    options: SearchOptions,
) -> Result<i32, SearchError> {
    let mut config = Config::load();
    if let Some(ms) = timeout_ms {
        config.search.timeout_ms = ms;
    }

    let path = catalog.or(config.datastore.catalog).ok_or_else(|| {
        SearchError::config("no catalog configured; pass --catalog or set KCDB_CATALOG")
    })?;
    let store = CatalogDatastore::open(&path)?;

    let cmd = SearchCommand::new(store, config.search);
    let output = cmd.run(query, &options);

    let formatted = cmd.format_output(&output, &options);
    if !formatted.is_empty() {
        if output.success || options.json {
            println!("{}", formatted);
        } else {
            eprint!("{}", formatted);
        }
    }

    Ok(output.exit_code())
}

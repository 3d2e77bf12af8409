//! eCFR analyzer CLI
//!
//! Thin wrapper over the analysis pipeline: resolves the agency reference
//! table, then dispatches to the requested operation and prints JSON.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ecfr_analyzer::{
    error::Result,
    models::{AgencyIndex, Config},
    pipeline::Analyzer,
    services::EcfrClient,
    storage::{DocumentStore, LocalStore},
};

/// eCFR regulation text analyzer
#[derive(Parser, Debug)]
#[command(
    name = "ecfr",
    version,
    about = "Fetches, caches, and analyzes eCFR regulation text per agency"
)]
struct Cli {
    /// Path to the data directory (cache and config)
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List agencies from the reference table
    Agencies,

    /// Analyze an agency's regulation text on one or two dates
    Analyze {
        /// Agency slug (see `agencies`)
        #[arg(long)]
        agency: String,

        /// Date to analyze (YYYY-MM-DD); pass twice for a delta
        #[arg(long = "date", required = true, num_args = 1)]
        dates: Vec<NaiveDate>,
    },

    /// Show the chapter sections relevant to an agency on a date
    Chapters {
        /// Agency slug (see `agencies`)
        #[arg(long)]
        agency: String,

        /// Date of the snapshot (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Download a single title's XML into the cache
    Fetch {
        /// CFR title number (1-50)
        #[arg(long)]
        title: u32,

        /// Date of the snapshot (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the agency reference table, fetching and caching it if absent.
async fn load_index(store: &LocalStore, client: &EcfrClient) -> Result<AgencyIndex> {
    let bytes = match store.read_agencies().await? {
        Some(bytes) => bytes,
        None => {
            log::info!("Agency table not cached, fetching...");
            let bytes = client.fetch_agencies().await?;
            store.write_agencies(&bytes).await?;
            bytes
        }
    };
    let index = AgencyIndex::from_json(&bytes)?;
    log::info!("Loaded {} agencies", index.len());
    Ok(index)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.data_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);
    config.cache.data_dir = cli.data_dir.clone();

    if let Command::Validate = cli.command {
        config.validate()?;
        log::info!("✓ Config OK");
        return Ok(());
    }

    let config = Arc::new(config);
    let store = Arc::new(LocalStore::new(&config.cache.data_dir));
    let client = Arc::new(EcfrClient::new(&config.api)?);

    let index = Arc::new(load_index(&store, &client).await?);
    let analyzer = Analyzer::new(
        Arc::clone(&config),
        Arc::clone(&index),
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        client,
    );

    match cli.command {
        Command::Agencies => {
            print_json(&analyzer.list_agencies())?;
        }

        Command::Analyze { agency, dates } => {
            let report = analyzer.analyze(&agency, &dates).await?;
            for day in &report.dates {
                for failure in &day.failures {
                    log::warn!("{}: title {} skipped: {}", day.date, failure.title, failure.error);
                }
            }
            print_json(&report)?;
        }

        Command::Chapters { agency, date } => {
            let view = analyzer.chapters(&agency, date).await?;
            if view.chapters.is_empty() {
                log::warn!("No sections found for {} on {}", agency, date);
            }
            print_json(&view)?;
        }

        Command::Fetch { title, date } => {
            let bytes = analyzer.download_title(title, date).await?;
            let key = LocalStore::title_key(title, date);
            log::info!(
                "{} bytes cached at {}",
                bytes.len(),
                store.path(&key).display()
            );
        }

        Command::Validate => unreachable!("handled above"),
    }

    Ok(())
}

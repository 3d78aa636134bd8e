//! hn-crawler CLI
//!
//! Local execution entry point. For AWS Lambda, use `hn-crawler-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use hn_crawler::{
    error::Result,
    models::Config,
    pipeline::CrawlerService,
    services::WordFilter,
    storage::{LocalStorage, MemoryStorage, RecordStore},
};

/// hn-crawler - Hacker News front-page crawler
#[derive(Parser, Debug)]
#[command(
    name = "hn-crawler",
    version,
    about = "Scrapes the Hacker News front page and filters stored entries"
)]

struct Cli {
    /// Path to storage directory containing config.toml and records
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Keep records in memory only (nothing is written to disk)
    #[arg(long)]
    ephemeral: bool,

    /// Caller identifier recorded in the usage log
    #[arg(long, env = "HN_CALLER")]
    caller: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the front page and store its entries
    Scrape,

    /// Show a word-count view of all stored entries
    Filter {
        #[arg(value_enum)]
        view: View,
    },

    /// Show all stored entries
    Entries,

    /// Show the usage log
    Usage,

    /// Validate configuration
    Validate,

    /// Show storage info
    Info,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum View {
    /// Titles with more than five words, by comments
    MoreThanFive,
    /// Titles with five or fewer words, by points
    FiveOrFewer,
}

impl From<View> for WordFilter {
    fn from(view: View) -> Self {
        match view {
            View::MoreThanFive => WordFilter::MoreThanFiveWords,
            View::FiveOrFewer => WordFilter::FiveOrFewerWords,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load configurations
    let config_path = cli.storage_dir.join("config.toml");
    let config = Arc::new(Config::load_or_default(&config_path));

    let store: Arc<dyn RecordStore> = if cli.ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(LocalStorage::new(&cli.storage_dir))
    };
    let caller = cli.caller.as_deref();

    match cli.command {
        Command::Scrape => {
            let service = CrawlerService::with_http(Arc::clone(&config), store)?;
            let entries = service.scrape(caller).await?;
            log::info!("Scraped {} entries", entries.len());
            print_json(&entries)?;
        }

        Command::Filter { view } => {
            let service = CrawlerService::with_http(Arc::clone(&config), store)?;
            let entries = service.filter(view.into(), caller).await?;
            print_json(&entries)?;
        }

        Command::Entries => {
            let entries = store.load_entries().await?;
            print_json(&entries)?;
        }

        Command::Usage => {
            let usage = store.load_usage().await?;
            print_json(&usage)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (source: {})", config.crawler.source_url);
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "config.toml"
                } else {
                    "defaults"
                }
            );
            log::info!("Source: {}", config.crawler.source_url);

            let entries = store.load_entries().await?;
            let usage = store.load_usage().await?;
            log::info!("Stored entries: {}", entries.len());
            log::info!("Usage records: {}", usage.len());
            if let Some(last) = usage.last() {
                log::info!(
                    "Last request: {} at {}",
                    last.applied_filter,
                    last.request_timestamp
                );
            }
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use tracing::error;

mod catalog;
mod config;
mod decklist;
mod domain;
mod error;
mod logging;
mod pipeline;
mod report;
mod resolver;

use crate::catalog::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use crate::config::Config;
use crate::pipeline::ResolutionRun;

#[derive(Parser)]
#[command(name = "deck_resolver")]
#[command(about = "Resolve a decklist against a card catalog snapshot")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug-level logging for this crate
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a catalog snapshot for later offline runs
    FetchCatalog {
        /// Bulk-data URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
        /// Where to write the snapshot (defaults to the configured path)
        #[arg(long)]
        out: Option<String>,
    },
    /// Resolve a decklist against a local catalog snapshot
    Resolve {
        /// Decklist file, one card per line: `4 Lightning Bolt (LEA)`
        #[arg(long)]
        decklist: String,
        /// Catalog snapshot file (defaults to the configured path)
        #[arg(long)]
        catalog: Option<String>,
        /// Directory for the JSON/Markdown reports
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Fetch a fresh snapshot, then resolve against it
    Run {
        #[arg(long)]
        decklist: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        output_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::FetchCatalog { url, out } => {
            let url = url.unwrap_or(config.catalog.bulk_url);
            let out = out.unwrap_or(config.catalog.snapshot_path);
            println!("📥 Fetching catalog snapshot...");

            let source = HttpCatalogSource::new(url, config.catalog.timeout_seconds);
            match source.fetch_to_file(&out).await {
                Ok(count) => {
                    println!("✅ Saved {} records to {}", count, out);
                }
                Err(e) => {
                    error!("Catalog fetch failed: {}", e);
                    println!("❌ Catalog fetch failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Resolve {
            decklist,
            catalog,
            output_dir,
        } => {
            let catalog = catalog.unwrap_or(config.catalog.snapshot_path);
            let output_dir = output_dir.unwrap_or(config.output.dir);

            let source: Box<dyn CatalogSource> = Box::new(FileCatalogSource::new(catalog));
            if let Err(e) = ResolutionRun::execute(source, &decklist, &output_dir).await {
                error!("Resolution run failed: {}", e);
                println!("❌ Resolution run failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Run {
            decklist,
            url,
            output_dir,
        } => {
            let url = url.unwrap_or(config.catalog.bulk_url);
            let output_dir = output_dir.unwrap_or(config.output.dir);
            println!("🚀 Running full pipeline (fetch + resolve)...");

            let source: Box<dyn CatalogSource> =
                Box::new(HttpCatalogSource::new(url, config.catalog.timeout_seconds));
            if let Err(e) = ResolutionRun::execute(source, &decklist, &output_dir).await {
                error!("Resolution run failed: {}", e);
                println!("❌ Resolution run failed: {}", e);
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

//! CLI entry point for the proceedings downloader.

use anyhow::{Context, Result};
use clap::Parser;
use proceedings_core::{ScraperConfig, Scraper};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let mut config = ScraperConfig::new(&args.base_url, &args.output_dir)
        .context("invalid --base-url")?;
    if !args.years.is_empty() {
        config = config.with_years(args.years.clone());
    }
    config.transport.accept_invalid_certs = args.insecure;

    let scraper = Scraper::new(config)?;
    let config = scraper.config();
    info!(
        base_url = %config.base_url,
        output_dir = %config.output_dir.display(),
        years = ?config.years,
        "Proceedings downloader starting"
    );

    let stats = scraper.run().await?;

    info!(
        papers = stats.papers_recorded(),
        skipped = stats.papers_skipped(),
        pdfs = stats.pdfs_downloaded(),
        "Done"
    );

    Ok(())
}

//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use proceedings_core::config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};

/// Harvest conference proceedings into a per-year PDF archive.
///
/// Walks each year's index page, visits every paper, downloads its PDF and
/// records it in `output.csv` under the output directory. Without arguments
/// the compiled-in years and paths are used.
#[derive(Parser, Debug)]
#[command(name = "proceedings-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Root directory for output.csv and the per-year PDF directories
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Proceedings host to crawl
    #[arg(short = 'b', long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Year to process, repeatable, processed in the given order (default: 2020 then 2019)
    #[arg(short = 'y', long = "year", value_parser = clap::value_parser!(u16).range(1987..=2100))]
    pub years: Vec<u16>,

    /// Accept invalid TLS certificates (for broken mirrors and test hosts only)
    #[arg(long)]
    pub insecure: bool,
}

//! Command-line arguments for the feed replay binary.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use feed_common::OutputFormat;
use feed_engine::DEFAULT_FREE_QUOTA;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a command script. Reads standard input when omitted.
    #[clap(long)]
    pub path: Option<String>,

    /// Output format for `get_data` responses.
    #[clap(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Number of successful `get_data` calls granted to each free subscriber.
    #[clap(long, default_value_t = DEFAULT_FREE_QUOTA)]
    pub free_quota: u32,
}

//! Feed Replay — replays a market data command script and prints one line per
//! `get_data` request to stdout. Logs go to stderr and are controlled by `RUST_LOG`.
//!
//! Usage example (CLI):
//! ```bash
//! feed_replay --path ./script.txt
//! feed_replay --format json --free-quota 10 < ./script.txt
//! ```
//!
//! A script may start with a line holding the number of commands that follow.
//! Each command is either `P <id> <price> <secondary>` or
//! `S <P|F> <subscriber> <subscribe|get_data> <id>`.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use feed_common::ParserError;
use feed_common::Result;
use feed_engine::{AccessCoordinator, ScriptReplayer};
use log::{error, info};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

fn main() -> Result<(), ParserError> {
    init_logger();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut replayer = ScriptReplayer::new(
        AccessCoordinator::with_free_quota(args.free_quota),
        BufWriter::new(stdout.lock()),
        args.format,
    );

    let summary = match args.path.as_deref() {
        Some(raw) => {
            let file_path = normalize_path(raw);
            if !is_file_exist(&file_path) {
                error!("Script file not found: {}", file_path.display());
                return Err(ParserError::Format(format!(
                    "script file not found: {}",
                    file_path.display()
                )));
            }
            info!("Replaying script {}", file_path.display());
            let file = File::open(&file_path)?;
            replayer.run(BufReader::new(file))?
        }
        None => {
            info!("Replaying script from stdin");
            replayer.run(io::stdin().lock())?
        }
    };

    info!("Replay finished: {}", summary);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}

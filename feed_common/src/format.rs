//! Output formats for replay responses.

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

/// How responses are written to the output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// `kind,subscriber,instrument,price,secondary` lines.
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

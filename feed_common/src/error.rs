//! Error types shared between the engine and the replay binary.
//!
//! The `ParserError` enum unifies the failure cases that can stop or skip work:
//! I/O on the script or output stream, malformed command lines, and JSON encoding
//! of responses. Policy rejections (quota, entitlement, ...) are not errors; they
//! live in the engine as `Rejection`.
use std::io;

use thiserror::Error;

/// Unified error type shared across the workspace.
#[derive(Error, Debug)]
pub enum ParserError {
    /// I/O error originating from the script reader or the output writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// A script line that could not be parsed into a `Command`.
    #[error("Malformed command: {0}")]
    Command(String),

    /// Failure while encoding a response as JSON via serde_json.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

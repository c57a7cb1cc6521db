//!
//! Common types and utilities shared by the feed engine and the replay binary.
//!
//! This crate aggregates:
//! - `error` — unified error type `ParserError` used across the workspace.
//! - `result` — handy `Result<T, ParserError>` alias.
//! - `instrument` — instrument ids and the equity/bond class ranges.
//! - `command` — script lines parsed into `Command` values.
//! - `format` — output formats selectable on the command line.
#![warn(missing_docs)]
pub mod command;
pub mod error;
pub mod format;
pub mod instrument;
pub mod result;

pub use command::{Action, Command, SubscriberKind};
pub use error::ParserError;
pub use format::OutputFormat;
pub use instrument::{InstrumentClass, InstrumentId, InstrumentRef};
pub use result::Result;

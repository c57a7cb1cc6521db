//! Market data feed engine.
//!
//! Holds the in-memory state of a two-class market data feed (equities with ids
//! `[0, 1000)`, bonds with ids `[1000, 2000)`) and replays scripted publish and
//! subscriber commands against it:
//!
//! - `model::access_coordinator::AccessCoordinator` — owns the per-class
//!   `InstrumentStore`s and `SubscriptionRegistry`s plus every `Subscriber`, and
//!   decides whether a `get_data` request is served.
//! - `replay::ScriptReplayer` — reads script lines, parses them into
//!   `feed_common::Command`s, applies them one at a time and writes a response
//!   line for every `get_data`.
//!
//! Everything runs on the caller's thread; one command is fully applied before the
//! next line is read.
#![warn(missing_docs)]

pub mod model;
pub mod replay;

pub use model::access_coordinator::{AccessCoordinator, DEFAULT_FREE_QUOTA, Rejection};
pub use model::snapshot::{InstrumentSnapshot, SecondaryMetric};
pub use replay::{ReplaySummary, Response, ScriptReplayer};

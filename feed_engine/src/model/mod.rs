//! Domain models of the feed engine.
//!
//! - `snapshot` — latest price plus volume/yield of an instrument.
//! - `instrument_store` — per-class snapshot storage.
//! - `subscription_registry` — per-class entitlements.
//! - `subscriber` — subscriber kind and quota state.
//! - `access_coordinator` — owner of all of the above and enforcer of the read policy.

pub mod access_coordinator;
pub mod instrument_store;
pub mod snapshot;
pub mod subscriber;
pub mod subscription_registry;

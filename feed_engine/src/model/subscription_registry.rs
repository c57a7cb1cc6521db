//! Per-class record of which subscribers may read which instruments.

use std::collections::{HashMap, HashSet};

use feed_common::{InstrumentClass, InstrumentId};
use log::debug;

/// Entitlements for one instrument class, keyed by instrument id.
#[derive(Debug)]
pub struct SubscriptionRegistry {
    class: InstrumentClass,
    entitlements: HashMap<InstrumentId, HashSet<String>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry for `class`.
    pub fn new(class: InstrumentClass) -> Self {
        Self {
            class,
            entitlements: HashMap::new(),
        }
    }

    /// Entitle `subscriber_id` to read `id`.
    ///
    /// Granting an entitlement that is already held is a successful no-op.
    /// Returns `false` when `id` is outside this registry's class range.
    pub fn grant(&mut self, subscriber_id: &str, id: InstrumentId) -> bool {
        if !self.class.contains(id) {
            debug!("{} registry refused grant for instrument {}", self.class, id);
            return false;
        }
        self.entitlements
            .entry(id)
            .or_default()
            .insert(subscriber_id.to_string());
        true
    }

    /// Whether `subscriber_id` holds an entitlement for `id`.
    pub fn has_entitlement(&self, subscriber_id: &str, id: InstrumentId) -> bool {
        self.entitlements
            .get(&id)
            .map(|subscribers| subscribers.contains(subscriber_id))
            .unwrap_or(false)
    }
}

//! Per-class storage of the latest instrument snapshots.
//!
//! Each store serves exactly one `InstrumentClass` and refuses ids outside that
//! class's range. Updates are last-write-wins with no versioning.

use std::collections::HashMap;

use feed_common::{InstrumentClass, InstrumentId};
use log::debug;

use crate::model::snapshot::InstrumentSnapshot;

/// Latest snapshot per instrument id for one instrument class.
#[derive(Debug)]
pub struct InstrumentStore {
    class: InstrumentClass,
    snapshots: HashMap<InstrumentId, InstrumentSnapshot>,
}

impl InstrumentStore {
    /// Create an empty store for `class`.
    pub fn new(class: InstrumentClass) -> Self {
        Self {
            class,
            snapshots: HashMap::new(),
        }
    }

    /// Store a new snapshot for `id`, replacing any previous one.
    ///
    /// Returns `false` without mutating anything when `id` is outside this
    /// store's class range.
    pub fn update(&mut self, id: InstrumentId, price: f64, secondary: f64) -> bool {
        if !self.class.contains(id) {
            debug!("{} store refused update for instrument {}", self.class, id);
            return false;
        }
        let snapshot = InstrumentSnapshot::from_published(self.class, price, secondary);
        self.snapshots.insert(id, snapshot);
        true
    }

    /// Latest snapshot for `id`, if one was ever published.
    pub fn lookup(&self, id: InstrumentId) -> Option<&InstrumentSnapshot> {
        self.snapshots.get(&id)
    }

    /// Number of instruments with a published snapshot.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been published yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot::SecondaryMetric;

    #[test]
    fn test_update_then_lookup() {
        let mut store = InstrumentStore::new(InstrumentClass::Equity);
        assert!(store.update(200, 101.25, 5000.0));

        let snapshot = store.lookup(200).unwrap();
        assert_eq!(snapshot.last_traded_price, 101.25);
        assert_eq!(snapshot.secondary, SecondaryMetric::Volume(5000));
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = InstrumentStore::new(InstrumentClass::Bond);
        assert!(store.update(1500, 99.0, 4.0));
        assert!(store.update(1500, 98.5, 4.2));

        let snapshot = store.lookup(1500).unwrap();
        assert_eq!(snapshot.last_traded_price, 98.5);
        assert_eq!(snapshot.secondary, SecondaryMetric::Yield(4.2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_out_of_range_update_is_refused() {
        let mut equities = InstrumentStore::new(InstrumentClass::Equity);
        assert!(!equities.update(1000, 1.0, 1.0));
        assert!(!equities.update(2500, 1.0, 1.0));
        assert!(equities.is_empty());

        let mut bonds = InstrumentStore::new(InstrumentClass::Bond);
        assert!(!bonds.update(999, 1.0, 1.0));
        assert!(!bonds.update(2000, 1.0, 1.0));
        assert!(bonds.is_empty());
    }

    #[test]
    fn test_lookup_unpublished() {
        let store = InstrumentStore::new(InstrumentClass::Equity);
        assert!(store.lookup(42).is_none());
    }
}

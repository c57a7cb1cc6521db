//! Instrument snapshot model.
//!
//! An `InstrumentSnapshot` is the latest published state of one instrument: the last
//! traded price plus a class-specific secondary metric (volume for equities, yield
//! for bonds). Snapshots are replaced wholesale on every publish.

use feed_common::InstrumentClass;
use serde::Serialize;

/// Class-specific secondary metric of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryMetric {
    /// Last-day traded volume of an equity.
    Volume(u64),
    /// Yield of a bond.
    Yield(f64),
}

impl SecondaryMetric {
    /// Numeric value used when rendering the metric.
    pub fn value(&self) -> f64 {
        match self {
            SecondaryMetric::Volume(volume) => *volume as f64,
            SecondaryMetric::Yield(bond_yield) => *bond_yield,
        }
    }
}

/// Latest market snapshot for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstrumentSnapshot {
    /// Last traded price.
    pub last_traded_price: f64,
    /// Volume or yield, depending on the instrument class.
    pub secondary: SecondaryMetric,
}

impl InstrumentSnapshot {
    /// Build a snapshot for `class` from the raw published values.
    ///
    /// Equity volumes are counts: the published value is truncated toward zero and
    /// negative or NaN values become 0.
    pub fn from_published(class: InstrumentClass, price: f64, secondary: f64) -> Self {
        let secondary = match class {
            InstrumentClass::Equity => SecondaryMetric::Volume(secondary as u64),
            InstrumentClass::Bond => SecondaryMetric::Yield(secondary),
        };
        Self {
            last_traded_price: price,
            secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equity_volume_is_truncated() {
        let snapshot = InstrumentSnapshot::from_published(InstrumentClass::Equity, 10.5, 1234.9);
        assert_eq!(snapshot.secondary, SecondaryMetric::Volume(1234));
        assert_eq!(snapshot.secondary.value(), 1234.0);
    }

    #[test]
    fn test_negative_volume_saturates() {
        let snapshot = InstrumentSnapshot::from_published(InstrumentClass::Equity, 1.0, -3.0);
        assert_eq!(snapshot.secondary, SecondaryMetric::Volume(0));
    }

    #[test]
    fn test_bond_yield_is_kept() {
        let snapshot = InstrumentSnapshot::from_published(InstrumentClass::Bond, 99.75, 4.125);
        assert_eq!(snapshot.secondary, SecondaryMetric::Yield(4.125));
        assert_eq!(snapshot.last_traded_price, 99.75);
    }
}

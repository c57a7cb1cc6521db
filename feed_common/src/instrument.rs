//! Instrument identifiers and their class ranges.
//!
//! The class of an instrument is never stored: it is recomputed from the numeric
//! id on every operation with [`InstrumentClass::classify`].
use std::fmt;
use std::ops::Range;

use serde::Serialize;
use strum_macros::Display;

/// Numeric instrument identifier as it appears in scripts.
pub type InstrumentId = u64;

/// Ids `[0, 1000)` are equities.
pub const EQUITY_IDS: Range<InstrumentId> = 0..1000;
/// Ids `[1000, 2000)` are bonds.
pub const BOND_IDS: Range<InstrumentId> = 1000..2000;

/// Instrument classes known to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum InstrumentClass {
    /// Equity; secondary metric is last-day volume.
    Equity,
    /// Bond; secondary metric is yield.
    Bond,
}

impl InstrumentClass {
    /// Resolve the class owning `id`, or `None` when the id is outside `[0, 2000)`.
    pub fn classify(id: InstrumentId) -> Option<Self> {
        if EQUITY_IDS.contains(&id) {
            Some(InstrumentClass::Equity)
        } else if BOND_IDS.contains(&id) {
            Some(InstrumentClass::Bond)
        } else {
            None
        }
    }

    /// Id range served by this class.
    pub fn ids(self) -> Range<InstrumentId> {
        match self {
            InstrumentClass::Equity => EQUITY_IDS,
            InstrumentClass::Bond => BOND_IDS,
        }
    }

    /// Whether `id` belongs to this class.
    pub fn contains(self, id: InstrumentId) -> bool {
        self.ids().contains(&id)
    }
}

/// Instrument named on a subscriber line: the token as written plus the id it
/// parsed to, if any.
///
/// A request naming an unparsable instrument is still a request; it is refused
/// downstream but echoed back with the token the script used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentRef {
    /// Token as written; empty when the line ended early.
    #[serde(rename = "instrument_token")]
    pub token: String,
    /// Parsed id, `None` when the token is missing or not an unsigned integer.
    #[serde(rename = "instrument_id")]
    pub id: Option<InstrumentId>,
}

impl InstrumentRef {
    /// Reference to a well-formed id.
    pub fn from_id(id: InstrumentId) -> Self {
        Self {
            token: id.to_string(),
            id: Some(id),
        }
    }

    /// Reference built from an optional script token.
    pub fn from_token(token: Option<&str>) -> Self {
        let token = token.unwrap_or_default();
        Self {
            token: token.to_string(),
            id: token.parse().ok(),
        }
    }
}

impl fmt::Display for InstrumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}", id),
            None => f.write_str(&self.token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Some(InstrumentClass::Equity))]
    #[case(999, Some(InstrumentClass::Equity))]
    #[case(1000, Some(InstrumentClass::Bond))]
    #[case(1999, Some(InstrumentClass::Bond))]
    #[case(2000, None)]
    #[case(u64::MAX, None)]
    fn test_classify_boundaries(#[case] id: InstrumentId, #[case] expected: Option<InstrumentClass>) {
        assert_eq!(InstrumentClass::classify(id), expected);
    }

    #[test]
    fn test_contains_is_class_local() {
        assert!(InstrumentClass::Equity.contains(200));
        assert!(!InstrumentClass::Bond.contains(200));
        assert!(InstrumentClass::Bond.contains(1500));
        assert!(!InstrumentClass::Equity.contains(1500));
    }

    #[rstest]
    #[case(Some("200"), Some(200), "200")]
    #[case(Some("0200"), Some(200), "200")]
    #[case(Some("-5"), None, "-5")]
    #[case(Some("99999999999999999999"), None, "99999999999999999999")]
    #[case(Some("abc"), None, "abc")]
    #[case(None, None, "")]
    fn test_instrument_ref_from_token(
        #[case] token: Option<&str>,
        #[case] id: Option<InstrumentId>,
        #[case] rendered: &str,
    ) {
        let instrument = InstrumentRef::from_token(token);
        assert_eq!(instrument.id, id);
        assert_eq!(instrument.to_string(), rendered);
    }
}

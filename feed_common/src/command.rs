//! Script command type shared by the engine and the replay binary.
//!
//! A script line is either a publish (`P <id> <price> <secondary>`) or a
//! subscriber request (`S <kind> <subscriber> <action> <id>`). Tokens are
//! separated by whitespace and trailing extra tokens are ignored.
//!
//! A subscriber line only needs its kind and subscriber tokens: the subscriber is
//! bound on first mention even when the action or instrument that follows is
//! unusable.
use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use strum_macros::{Display, EnumString};

use crate::error::ParserError;
use crate::instrument::{InstrumentId, InstrumentRef};

/// Leading token of a publish line.
pub const PUBLISH: &str = "P";
/// Leading token of a subscriber line.
pub const SUBSCRIBER: &str = "S";

/// Subscriber kinds and their quota behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum SubscriberKind {
    /// Unlimited `get_data` calls.
    #[strum(serialize = "P")]
    Paid,
    /// `get_data` calls capped by a quota.
    #[strum(serialize = "F")]
    Free,
}

impl SubscriberKind {
    /// Starting quota for a new subscriber of this kind; `None` means unlimited.
    pub fn initial_quota(self, free_quota: u32) -> Option<u32> {
        match self {
            SubscriberKind::Paid => None,
            SubscriberKind::Free => Some(free_quota),
        }
    }
}

/// Action requested by a subscriber line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Action {
    /// Record an entitlement for the instrument.
    #[strum(serialize = "subscribe")]
    Subscribe,
    /// Read the latest snapshot of the instrument.
    #[strum(serialize = "get_data")]
    GetData,
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Publish or overwrite the snapshot of an instrument.
    Publish {
        /// Target instrument.
        instrument_id: InstrumentId,
        /// Last traded price.
        price: f64,
        /// Volume for equities, yield for bonds.
        secondary: f64,
    },
    /// Subscribe to or read an instrument on behalf of a subscriber.
    Subscriber {
        /// Kind token exactly as written; validated by the engine so an unknown
        /// letter can still be echoed back in a rejection line.
        kind_tag: String,
        /// Subscriber identifier.
        subscriber_id: String,
        /// Requested action; `None` when the token is missing or unknown.
        action: Option<Action>,
        /// Target instrument, kept even when its token does not parse.
        instrument: InstrumentRef,
    },
}

impl FromStr for Command {
    type Err = ParserError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some(PUBLISH) => Ok(Command::Publish {
                instrument_id: next_token(&mut tokens, "instrument id")?,
                price: next_token(&mut tokens, "price")?,
                secondary: next_token(&mut tokens, "secondary value")?,
            }),
            Some(SUBSCRIBER) => Ok(Command::Subscriber {
                kind_tag: next_token(&mut tokens, "subscriber kind")?,
                subscriber_id: next_token(&mut tokens, "subscriber id")?,
                action: tokens.next().and_then(|token| token.parse().ok()),
                instrument: InstrumentRef::from_token(tokens.next()),
            }),
            Some(other) => Err(ParserError::Command(format!("unknown command `{}`", other))),
            None => Err(ParserError::Command("empty line".to_string())),
        }
    }
}

fn next_token<T>(tokens: &mut SplitWhitespace<'_>, field: &str) -> Result<T, ParserError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let token = tokens
        .next()
        .ok_or_else(|| ParserError::Command(format!("missing {}", field)))?;
    token
        .parse()
        .map_err(|e| ParserError::Command(format!("invalid {} `{}`: {}", field, token, e)))
}

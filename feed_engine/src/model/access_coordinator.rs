//! Single point enforcing the data-access policy.
//!
//! The coordinator exclusively owns one `InstrumentStore` and one
//! `SubscriptionRegistry` per instrument class, plus the table of registered
//! subscribers. Every read goes through [`AccessCoordinator::request_data`],
//! which applies the checks in a fixed order and only charges a free
//! subscriber's quota once all of them passed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use feed_common::{InstrumentClass, InstrumentId, SubscriberKind};
use log::debug;
use thiserror::Error;

use crate::model::instrument_store::InstrumentStore;
use crate::model::snapshot::InstrumentSnapshot;
use crate::model::subscriber::Subscriber;
use crate::model::subscription_registry::SubscriptionRegistry;

/// Quota granted to a new free subscriber unless configured otherwise.
pub const DEFAULT_FREE_QUOTA: u32 = 100;

/// Why a subscriber request was refused.
///
/// Callers outside the engine see every variant as the same `invalid_request`
/// outcome; the variants exist for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Instrument id outside `[0, 2000)`.
    #[error("instrument {0} does not belong to any instrument class")]
    UnknownInstrument(InstrumentId),

    /// Instrument token that is not an unsigned integer, or no token at all.
    #[error("instrument token `{0}` is not an instrument id")]
    UnparsedInstrument(String),

    /// First mention of a subscriber with a kind token other than `P`/`F`.
    #[error("unknown subscriber kind `{0}`")]
    UnknownKind(String),

    /// Existing subscriber named with a different kind token.
    #[error("subscriber {subscriber_id} is registered as {registered}, request said `{requested}`")]
    KindMismatch {
        /// Subscriber named by the request.
        subscriber_id: String,
        /// Kind fixed at registration.
        registered: SubscriberKind,
        /// Kind token carried by the request.
        requested: String,
    },

    /// Free subscriber with no reads left.
    #[error("subscriber {0} has exhausted its quota")]
    QuotaExhausted(String),

    /// Subscriber never subscribed to the instrument.
    #[error("subscriber {subscriber_id} is not entitled to instrument {instrument_id}")]
    NotEntitled {
        /// Subscriber named by the request.
        subscriber_id: String,
        /// Requested instrument.
        instrument_id: InstrumentId,
    },

    /// Nothing was ever published for the instrument.
    #[error("no data published for instrument {0}")]
    NoData(InstrumentId),
}

/// Store and registry serving one instrument class.
#[derive(Debug)]
struct ClassBook {
    store: InstrumentStore,
    registry: SubscriptionRegistry,
}

impl ClassBook {
    fn new(class: InstrumentClass) -> Self {
        Self {
            store: InstrumentStore::new(class),
            registry: SubscriptionRegistry::new(class),
        }
    }
}

#[derive(Debug)]
struct ClassBooks {
    equities: ClassBook,
    bonds: ClassBook,
}

impl ClassBooks {
    fn get(&self, class: InstrumentClass) -> &ClassBook {
        match class {
            InstrumentClass::Equity => &self.equities,
            InstrumentClass::Bond => &self.bonds,
        }
    }

    fn get_mut(&mut self, class: InstrumentClass) -> &mut ClassBook {
        match class {
            InstrumentClass::Equity => &mut self.equities,
            InstrumentClass::Bond => &mut self.bonds,
        }
    }
}

/// Owner of all feed state and enforcer of the read policy.
#[derive(Debug)]
pub struct AccessCoordinator {
    books: ClassBooks,
    subscribers: HashMap<String, Subscriber>,
    free_quota: u32,
}

impl Default for AccessCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessCoordinator {
    /// Create a coordinator with the default free quota.
    pub fn new() -> Self {
        Self::with_free_quota(DEFAULT_FREE_QUOTA)
    }

    /// Create a coordinator whose free subscribers start with `free_quota` reads.
    pub fn with_free_quota(free_quota: u32) -> Self {
        Self {
            books: ClassBooks {
                equities: ClassBook::new(InstrumentClass::Equity),
                bonds: ClassBook::new(InstrumentClass::Bond),
            },
            subscribers: HashMap::new(),
            free_quota,
        }
    }

    /// Publish a snapshot, routed to the store of the instrument's class.
    ///
    /// Returns `false` when the id is outside every class range.
    pub fn publish(&mut self, id: InstrumentId, price: f64, secondary: f64) -> bool {
        match InstrumentClass::classify(id) {
            Some(class) => self.books.get_mut(class).store.update(id, price, secondary),
            None => {
                debug!("Publish for unknown instrument {} ignored", id);
                false
            }
        }
    }

    /// Resolve a subscriber, creating it on first mention.
    ///
    /// A known subscriber named with a different kind token is rejected and left
    /// untouched.
    pub fn register(&mut self, kind_tag: &str, subscriber_id: &str) -> Result<&mut Subscriber, Rejection> {
        resolve_subscriber(&mut self.subscribers, self.free_quota, kind_tag, subscriber_id)
    }

    /// Entitle a subscriber to an instrument, registering the subscriber if needed.
    pub fn subscribe(&mut self, kind_tag: &str, subscriber_id: &str, id: InstrumentId) -> Result<(), Rejection> {
        resolve_subscriber(&mut self.subscribers, self.free_quota, kind_tag, subscriber_id)?;
        let class = InstrumentClass::classify(id).ok_or(Rejection::UnknownInstrument(id))?;
        if self.books.get_mut(class).registry.grant(subscriber_id, id) {
            Ok(())
        } else {
            Err(Rejection::UnknownInstrument(id))
        }
    }

    /// Read the latest snapshot of `id` on behalf of a subscriber.
    ///
    /// Checks run in order and stop at the first failure: subscriber kind,
    /// instrument range, quota, entitlement, published data. A free subscriber's
    /// quota is charged only when every check passed.
    pub fn request_data(
        &mut self,
        kind_tag: &str,
        subscriber_id: &str,
        id: InstrumentId,
    ) -> Result<InstrumentSnapshot, Rejection> {
        let subscriber = resolve_subscriber(&mut self.subscribers, self.free_quota, kind_tag, subscriber_id)?;
        let class = InstrumentClass::classify(id).ok_or(Rejection::UnknownInstrument(id))?;
        let book = self.books.get(class);

        if !subscriber.has_quota() {
            return Err(Rejection::QuotaExhausted(subscriber_id.to_string()));
        }
        if !book.registry.has_entitlement(subscriber_id, id) {
            return Err(Rejection::NotEntitled {
                subscriber_id: subscriber_id.to_string(),
                instrument_id: id,
            });
        }
        let snapshot = *book.store.lookup(id).ok_or(Rejection::NoData(id))?;

        subscriber.consume_quota();
        Ok(snapshot)
    }

    /// Registered subscriber, if any.
    pub fn subscriber(&self, subscriber_id: &str) -> Option<&Subscriber> {
        self.subscribers.get(subscriber_id)
    }

    /// Store serving `class`.
    pub fn store(&self, class: InstrumentClass) -> &InstrumentStore {
        &self.books.get(class).store
    }

    /// Registry serving `class`.
    pub fn registry(&self, class: InstrumentClass) -> &SubscriptionRegistry {
        &self.books.get(class).registry
    }
}

fn resolve_subscriber<'a>(
    subscribers: &'a mut HashMap<String, Subscriber>,
    free_quota: u32,
    kind_tag: &str,
    subscriber_id: &str,
) -> Result<&'a mut Subscriber, Rejection> {
    let requested = kind_tag.parse::<SubscriberKind>().ok();
    match subscribers.entry(subscriber_id.to_string()) {
        Entry::Occupied(entry) => {
            let subscriber = entry.into_mut();
            if requested != Some(subscriber.kind()) {
                return Err(Rejection::KindMismatch {
                    subscriber_id: subscriber_id.to_string(),
                    registered: subscriber.kind(),
                    requested: kind_tag.to_string(),
                });
            }
            Ok(subscriber)
        }
        Entry::Vacant(entry) => {
            let kind = requested.ok_or_else(|| Rejection::UnknownKind(kind_tag.to_string()))?;
            let subscriber = entry.insert(Subscriber::new(subscriber_id, kind, free_quota));
            debug!("Registered {:?} subscriber {}", subscriber.kind(), subscriber.id());
            Ok(subscriber)
        }
    }
}

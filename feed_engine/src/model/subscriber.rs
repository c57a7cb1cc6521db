//! Subscriber state: a fixed kind and, for free subscribers, a request quota.

use feed_common::SubscriberKind;

/// A registered subscriber.
///
/// The kind is fixed at creation. `remaining_quota` is `None` for paid
/// subscribers and only ever decreases for free ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    id: String,
    kind: SubscriberKind,
    remaining_quota: Option<u32>,
}

impl Subscriber {
    /// Create a subscriber of `kind`; free subscribers start with `free_quota`.
    pub fn new(id: &str, kind: SubscriberKind, free_quota: u32) -> Self {
        Self {
            id: id.to_string(),
            kind,
            remaining_quota: kind.initial_quota(free_quota),
        }
    }

    /// Subscriber identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind fixed at registration.
    pub fn kind(&self) -> SubscriberKind {
        self.kind
    }

    /// Remaining successful reads; `None` means unlimited.
    pub fn remaining_quota(&self) -> Option<u32> {
        self.remaining_quota
    }

    /// Whether another read may be attempted.
    pub fn has_quota(&self) -> bool {
        self.remaining_quota.is_none_or(|left| left > 0)
    }

    /// Charge one successful read against the quota.
    pub fn consume_quota(&mut self) {
        if let Some(left) = self.remaining_quota.as_mut() {
            *left = left.saturating_sub(1);
        }
    }
}

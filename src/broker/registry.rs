//! Subscription registry
//!
//! An ordered list of `(pattern, handler)` pairs. Entries are matched in the
//! order they were added. Lookups and removals compare the pattern string
//! byte for byte; wildcards have no meaning here.
//!
//! The registry does not reject duplicates on its own, the broker checks
//! [`SubscriptionRegistry::find_by_topic`] before appending.

use std::fmt;

use crate::endpoint::MessageHandler;

pub struct Subscription {
    pub topic: String,
    pub handler: MessageHandler,
}

impl Subscription {
    pub fn new(topic: impl Into<String>, handler: MessageHandler) -> Self {
        Self {
            topic: topic.into(),
            handler,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("handler", &"Fn(&str, &str)")
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: Vec<Subscription>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a subscription at the tail.
    pub fn append(&mut self, subscription: Subscription) {
        self.entries.push(subscription);
    }

    /// Removes the first entry whose pattern equals `topic`.
    ///
    /// Returns the removed entry, `None` if nothing matched.
    pub fn remove_by_topic(&mut self, topic: &str) -> Option<Subscription> {
        let position = self.entries.iter().position(|s| s.topic == topic)?;
        Some(self.entries.remove(position))
    }

    pub fn find_by_topic(&self, topic: &str) -> Option<&Subscription> {
        self.entries.iter().find(|s| s.topic == topic)
    }

    /// Drops every subscription.
    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.entries.iter()
    }

    /// Patterns in registration order.
    pub fn topics(&self) -> Vec<String> {
        self.entries.iter().map(|s| s.topic.clone()).collect()
    }
}

//! Broker engine
//!
//! [`MockBroker`] is an in-process stand-in for a real MQTT broker. It
//! implements [`CommunicationEndpoint`] so the protocol layer can be driven
//! end to end without a network.
//!
//! Concurrency and usage notes:
//! - `publish` is a blocking fan-out. Matching handlers run on the caller's
//!   thread, in subscription order, before `publish` returns.
//! - Fan-out holds a reentrant dispatch lock, so publishes from different
//!   threads never interleave while a handler may still call back into the
//!   broker on its own thread.
//! - The handlers are collected before any of them runs. Subscriptions made
//!   or dropped by a handler take effect with the next publish.
//! - The `retain` flag is accepted and ignored; nothing is stored for late
//!   subscribers.

use parking_lot::{Mutex, ReentrantMutex};
use tracing::{debug, error, warn};

use crate::broker::matcher::matches;
use crate::broker::registry::{Subscription, SubscriptionRegistry};
use crate::broker::validator::{
    MAX_TOPIC_LENGTH, ValidationError, validate_publish, validate_subscribe,
};
use crate::endpoint::{ComError, ComResult, CommunicationEndpoint, MessageHandler};

#[derive(Debug)]
pub struct MockBroker {
    registry: Mutex<SubscriptionRegistry>,
    dispatch: ReentrantMutex<()>,
    max_topic_length: usize,
}

impl Default for MockBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBroker {
    pub fn new() -> Self {
        Self::with_max_topic_length(MAX_TOPIC_LENGTH)
    }

    pub fn with_max_topic_length(max_topic_length: usize) -> Self {
        Self {
            registry: Mutex::new(SubscriptionRegistry::new()),
            dispatch: ReentrantMutex::new(()),
            max_topic_length,
        }
    }

    pub fn max_topic_length(&self) -> usize {
        self.max_topic_length
    }

    /// Number of active subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Subscribed patterns in registration order.
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.registry.lock().topics()
    }

    pub fn is_subscribed(&self, topic: &str) -> bool {
        self.registry.lock().find_by_topic(topic).is_some()
    }

    /// Drops every subscription.
    pub fn reset(&self) {
        self.registry.lock().reset_all();
        debug!("all subscriptions dropped");
    }

    fn reject(topic: &str, e: ValidationError) -> ComError {
        match &e {
            ValidationError::Engine { .. } => {
                error!(%topic, error = %e, "topic validation failed")
            }
            _ => warn!(%topic, error = %e, "topic rejected"),
        }
        e.into()
    }

    fn matching_handlers(&self, topic: &str) -> Vec<MessageHandler> {
        self.registry
            .lock()
            .iter()
            .filter(|s| matches(&s.topic, topic))
            .map(|s| s.handler.clone())
            .collect()
    }
}

impl CommunicationEndpoint for MockBroker {
    fn publish(&self, topic: &str, payload: &str, _retain: bool) -> ComResult {
        validate_publish(topic, self.max_topic_length).map_err(|e| Self::reject(topic, e))?;

        let _dispatch = self.dispatch.lock();
        let handlers = self.matching_handlers(topic);
        debug!(%topic, subscribers = handlers.len(), "publishing");
        for handler in handlers {
            handler(topic, payload);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str, handler: MessageHandler) -> ComResult {
        validate_subscribe(topic, self.max_topic_length).map_err(|e| Self::reject(topic, e))?;

        let mut registry = self.registry.lock();
        if registry.find_by_topic(topic).is_some() {
            warn!(%topic, "topic already subscribed");
            return Err(ComError::TopicAlreadySubscribed);
        }
        registry.append(Subscription::new(topic, handler));
        debug!(%topic, "subscribed");
        Ok(())
    }

    fn unsubscribe(&self, topic: &str) -> ComResult {
        if self.registry.lock().remove_by_topic(topic).is_some() {
            debug!(%topic, "unsubscribed");
        }
        Ok(())
    }
}

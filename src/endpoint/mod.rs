//! The `endpoint` module describes the transport the protocol layer talks to.
//!
//! The protocol never performs network I/O itself. Anything that can
//! publish, subscribe and unsubscribe (a real MQTT client or the in-process
//! [`MockBroker`](crate::broker::MockBroker)) implements
//! [`CommunicationEndpoint`] and is handed to the protocol facade.

use std::sync::Arc;

use thiserror::Error;

/// Callback invoked with `(topic, payload)` for every delivered message.
pub type MessageHandler = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Wire code reported for a successful operation.
pub const NO_ERROR: u8 = 0x00;

/// Failures a transport can report.
///
/// Each variant carries the numeric code used on deployed devices, see
/// [`ComError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ComError {
    #[error("generic communication error")]
    Generic,
    #[error("broker not reachable")]
    BrokerNotReachable,
    #[error("topic too long")]
    TopicTooLong,
    #[error("invalid topic")]
    InvalidTopic,
    #[error("topic already subscribed")]
    TopicAlreadySubscribed,
}

impl ComError {
    pub const fn code(&self) -> u8 {
        match self {
            ComError::Generic => 0x01,
            ComError::BrokerNotReachable => 0x02,
            ComError::TopicTooLong => 0x11,
            ComError::InvalidTopic => 0x12,
            ComError::TopicAlreadySubscribed => 0x13,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(ComError::Generic),
            0x02 => Some(ComError::BrokerNotReachable),
            0x11 => Some(ComError::TopicTooLong),
            0x12 => Some(ComError::InvalidTopic),
            0x13 => Some(ComError::TopicAlreadySubscribed),
            _ => None,
        }
    }
}

pub type ComResult = Result<(), ComError>;

/// Numeric result code of an operation, `NO_ERROR` on success.
pub fn result_code(result: &ComResult) -> u8 {
    match result {
        Ok(()) => NO_ERROR,
        Err(e) => e.code(),
    }
}

/// The capability set the protocol layer requires from a pub/sub transport.
pub trait CommunicationEndpoint {
    fn publish(&self, topic: &str, payload: &str, retain: bool) -> ComResult;

    fn subscribe(&self, topic: &str, handler: MessageHandler) -> ComResult;

    fn unsubscribe(&self, topic: &str) -> ComResult;
}

impl<T: CommunicationEndpoint + ?Sized> CommunicationEndpoint for Arc<T> {
    fn publish(&self, topic: &str, payload: &str, retain: bool) -> ComResult {
        (**self).publish(topic, payload, retain)
    }

    fn subscribe(&self, topic: &str, handler: MessageHandler) -> ComResult {
        (**self).subscribe(topic, handler)
    }

    fn unsubscribe(&self, topic: &str) -> ComResult {
        (**self).unsubscribe(topic)
    }
}

impl<T: CommunicationEndpoint + ?Sized> CommunicationEndpoint for &T {
    fn publish(&self, topic: &str, payload: &str, retain: bool) -> ComResult {
        (**self).publish(topic, payload, retain)
    }

    fn subscribe(&self, topic: &str, handler: MessageHandler) -> ComResult {
        (**self).subscribe(topic, handler)
    }

    fn unsubscribe(&self, topic: &str) -> ComResult {
        (**self).unsubscribe(topic)
    }
}

#[cfg(test)]
mod tests;

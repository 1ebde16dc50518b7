//! Protocol facade
//!
//! One method per message kind. Each derives the topic (and for STATUS the
//! payload) and hands it to exactly one capability of the injected
//! [`CommunicationEndpoint`]. The endpoint's result is returned unchanged.
//!
//! Addressing:
//! - START, STOP and DO are commands. They are published to the target's
//!   namespace and subscribed on the own namespace.
//! - DATA and DONE are published on the own namespace; STATUS, DATA and
//!   DONE are subscribed on a named target.

use tracing::trace;

use crate::endpoint::{ComError, ComResult, CommunicationEndpoint, MessageHandler};
use crate::protocol::request::{PubRequest, SubRequest};
use crate::protocol::status::{DeviceStatus, render_status};
use crate::protocol::topic::{MessageKind, render_topic};

/// Identity of the local device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub device_id: String,
    pub base_url: String,
}

impl ProtocolConfig {
    pub fn new(device_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Protocol<E> {
    config: ProtocolConfig,
    endpoint: E,
}

impl<E: CommunicationEndpoint> Protocol<E> {
    pub fn new(config: ProtocolConfig, endpoint: E) -> Self {
        Self { config, endpoint }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    fn topic(
        &self,
        kind: MessageKind,
        device: &str,
        data_id: Option<&str>,
    ) -> Result<String, ComError> {
        let topic = render_topic(kind, &self.config.base_url, device, data_id)?;
        trace!(%kind, %topic, "derived topic");
        Ok(topic)
    }

    /// `{base}/{device}`, sent with START/STOP so the target knows where to
    /// deliver.
    fn reply_address(&self) -> String {
        let mut address =
            String::with_capacity(self.config.base_url.len() + self.config.device_id.len() + 1);
        address.push_str(&self.config.base_url);
        address.push('/');
        address.push_str(&self.config.device_id);
        address
    }

    // publish

    /// Publishes the own status. Always retained.
    pub fn publish_status(&self, status: &DeviceStatus) -> ComResult {
        let topic = self.topic(MessageKind::Status, &self.config.device_id, None)?;
        let payload = render_status(&self.config.device_id, status);
        self.endpoint.publish(&topic, &payload, true)
    }

    pub fn publish_data(&self, request: &PubRequest) -> ComResult {
        let topic = self.topic(
            MessageKind::Data,
            &self.config.device_id,
            Some(&request.data_id),
        )?;
        self.endpoint.publish(&topic, &request.data, false)
    }

    /// Asks `request.device_id` to start sending `request.data_id`.
    pub fn publish_start(&self, request: &PubRequest) -> ComResult {
        let topic = self.topic(
            MessageKind::Start,
            &request.device_id,
            Some(&request.data_id),
        )?;
        self.endpoint.publish(&topic, &self.reply_address(), false)
    }

    /// Asks `request.device_id` to stop sending `request.data_id`.
    pub fn publish_stop(&self, request: &PubRequest) -> ComResult {
        let topic = self.topic(
            MessageKind::Stop,
            &request.device_id,
            Some(&request.data_id),
        )?;
        self.endpoint.publish(&topic, &self.reply_address(), false)
    }

    /// Sends command `request.data_id` with settings `request.data`.
    pub fn publish_do(&self, request: &PubRequest) -> ComResult {
        let topic = self.topic(MessageKind::Do, &request.device_id, Some(&request.data_id))?;
        self.endpoint.publish(&topic, &request.data, false)
    }

    /// Reports the result of an executed command.
    pub fn publish_done(&self, request: &PubRequest) -> ComResult {
        let topic = self.topic(
            MessageKind::Done,
            &self.config.device_id,
            Some(&request.data_id),
        )?;
        self.endpoint.publish(&topic, &request.data, false)
    }

    // subscribe

    fn subscription_topic(
        &self,
        kind: MessageKind,
        request: &SubRequest,
    ) -> Result<String, ComError> {
        match kind {
            MessageKind::Status => self.topic(kind, &request.target_id, None),
            MessageKind::Data | MessageKind::Done => {
                self.topic(kind, &request.target_id, Some(&request.data_id))
            }
            MessageKind::Start | MessageKind::Stop | MessageKind::Do => {
                self.topic(kind, &self.config.device_id, Some(&request.data_id))
            }
        }
    }

    fn subscribe(
        &self,
        kind: MessageKind,
        request: &SubRequest,
        handler: MessageHandler,
    ) -> ComResult {
        let topic = self.subscription_topic(kind, request)?;
        self.endpoint.subscribe(&topic, handler)
    }

    fn unsubscribe(&self, kind: MessageKind, request: &SubRequest) -> ComResult {
        let topic = self.subscription_topic(kind, request)?;
        self.endpoint.unsubscribe(&topic)
    }

    pub fn subscribe_status(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Status, request, handler)
    }

    pub fn subscribe_data(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Data, request, handler)
    }

    pub fn subscribe_start(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Start, request, handler)
    }

    pub fn subscribe_stop(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Stop, request, handler)
    }

    pub fn subscribe_do(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Do, request, handler)
    }

    pub fn subscribe_done(&self, request: &SubRequest, handler: MessageHandler) -> ComResult {
        self.subscribe(MessageKind::Done, request, handler)
    }

    // unsubscribe

    pub fn unsubscribe_status(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Status, request)
    }

    pub fn unsubscribe_data(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Data, request)
    }

    pub fn unsubscribe_start(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Start, request)
    }

    pub fn unsubscribe_stop(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Stop, request)
    }

    pub fn unsubscribe_do(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Do, request)
    }

    pub fn unsubscribe_done(&self, request: &SubRequest) -> ComResult {
        self.unsubscribe(MessageKind::Done, request)
    }
}

//! Data requester
//!
//! Pulls one data stream from another device. The requester watches the
//! target's STATUS topic and only sends START/STOP while the target reports
//! itself ONLINE. Received values are buffered until [`DataRequester::next_data`]
//! takes them.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::endpoint::{ComError, CommunicationEndpoint, MessageHandler};
use crate::protocol::facade::Protocol;
use crate::protocol::request::{PubRequest, SubRequest};
use crate::protocol::status::{DeviceState, parse_status};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequesterError {
    #[error("device `{0}` is not available")]
    DeviceNotAvailable(String),
    #[error(transparent)]
    Communication(#[from] ComError),
}

#[derive(Debug, Default)]
struct RequesterState {
    device_state: DeviceState,
    buffer: VecDeque<String>,
}

pub struct DataRequester<'p, E: CommunicationEndpoint> {
    protocol: &'p Protocol<E>,
    subscription: SubRequest,
    state: Arc<Mutex<RequesterState>>,
}

impl<'p, E: CommunicationEndpoint> DataRequester<'p, E> {
    /// Subscribes to the status and the `data_id` stream of `target_id`.
    ///
    /// If the second subscription fails the first one is rolled back.
    ///
    /// The STATUS subscription is owned by the requester, so only one
    /// requester per target can exist on an endpoint at a time. A second
    /// one, even for another `data_id`, fails with
    /// [`ComError::TopicAlreadySubscribed`] while the first is alive.
    pub fn new(
        protocol: &'p Protocol<E>,
        target_id: impl Into<String>,
        data_id: impl Into<String>,
    ) -> Result<Self, RequesterError> {
        let subscription = SubRequest::new(target_id, data_id);
        let state = Arc::new(Mutex::new(RequesterState::default()));

        let status_state = Arc::clone(&state);
        let status_handler: MessageHandler = Arc::new(move |_topic, payload| {
            let online = parse_status(payload).device_state() == Some(DeviceState::Online);
            status_state.lock().device_state = if online {
                DeviceState::Online
            } else {
                DeviceState::Offline
            };
        });

        let data_state = Arc::clone(&state);
        let data_handler: MessageHandler = Arc::new(move |_topic, payload| {
            data_state.lock().buffer.push_back(payload.to_string());
        });

        protocol.subscribe_status(&subscription, status_handler)?;
        if let Err(e) = protocol.subscribe_data(&subscription, data_handler) {
            if let Err(rollback) = protocol.unsubscribe_status(&subscription) {
                warn!(error = %rollback, "failed to roll back status subscription");
            }
            return Err(e.into());
        }

        debug!(
            target_id = %subscription.target_id,
            data_id = %subscription.data_id,
            "data requester attached"
        );

        Ok(Self {
            protocol,
            subscription,
            state,
        })
    }

    pub fn target_state(&self) -> DeviceState {
        self.state.lock().device_state
    }

    fn request(&self) -> Result<PubRequest, RequesterError> {
        if self.target_state() == DeviceState::Offline {
            return Err(RequesterError::DeviceNotAvailable(
                self.subscription.target_id.clone(),
            ));
        }
        Ok(PubRequest::to(
            self.subscription.target_id.as_str(),
            self.subscription.data_id.as_str(),
            "",
        ))
    }

    pub fn start(&self) -> Result<(), RequesterError> {
        let request = self.request()?;
        self.protocol.publish_start(&request)?;
        Ok(())
    }

    pub fn stop(&self) -> Result<(), RequesterError> {
        let request = self.request()?;
        self.protocol.publish_stop(&request)?;
        Ok(())
    }

    /// Oldest buffered value, if any.
    pub fn next_data(&self) -> Option<String> {
        self.state.lock().buffer.pop_front()
    }

    pub fn buffered(&self) -> usize {
        self.state.lock().buffer.len()
    }
}

impl<E: CommunicationEndpoint> Drop for DataRequester<'_, E> {
    fn drop(&mut self) {
        if let Err(e) = self.protocol.unsubscribe_data(&self.subscription) {
            warn!(error = %e, "failed to unsubscribe data stream");
        }
        if let Err(e) = self.protocol.unsubscribe_status(&self.subscription) {
            warn!(error = %e, "failed to unsubscribe status");
        }
    }
}

//! Topic grammar
//!
//! Every message kind lives under `{base}/{device}/{KIND}`; all kinds except
//! STATUS append a data identifier as a fourth level:
//!
//! ```text
//! {base}/{device}/STATUS
//! {base}/{device}/DATA/{dataId}
//! {base}/{device}/START/{dataId}
//! {base}/{device}/STOP/{dataId}
//! {base}/{device}/DO/{dataId}
//! {base}/{device}/DONE/{dataId}
//! ```
//!
//! [`topic_length`] reports the exact byte length [`render_topic`] produces,
//! so callers can size buffers up front.

use std::fmt;

use thiserror::Error;

use crate::endpoint::ComError;

const SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Status,
    Data,
    Start,
    Stop,
    Do,
    Done,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Status,
        MessageKind::Data,
        MessageKind::Start,
        MessageKind::Stop,
        MessageKind::Do,
        MessageKind::Done,
    ];

    /// Keyword used as the third topic level.
    pub const fn keyword(&self) -> &'static str {
        match self {
            MessageKind::Status => "STATUS",
            MessageKind::Data => "DATA",
            MessageKind::Start => "START",
            MessageKind::Stop => "STOP",
            MessageKind::Do => "DO",
            MessageKind::Done => "DONE",
        }
    }

    pub const fn has_data_id(&self) -> bool {
        !matches!(self, MessageKind::Status)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| TopicError::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    #[error("{0} topics require a data identifier")]
    MissingDataId(MessageKind),
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
}

impl From<TopicError> for ComError {
    fn from(_: TopicError) -> Self {
        ComError::Generic
    }
}

/// Exact length in bytes of the topic [`render_topic`] builds for the same
/// arguments. A data identifier passed for STATUS is ignored.
pub fn topic_length(kind: MessageKind, base: &str, device: &str, data_id: Option<&str>) -> usize {
    // "{base}/{device}/{KIND}"
    let mut length = base.len() + device.len() + kind.keyword().len() + 2;
    if kind.has_data_id() {
        // "/{dataId}"
        length += 1 + data_id.map_or(0, str::len);
    }
    length
}

/// Builds the topic for `kind` addressed at `device`.
pub fn render_topic(
    kind: MessageKind,
    base: &str,
    device: &str,
    data_id: Option<&str>,
) -> Result<String, TopicError> {
    let data_id = match (kind.has_data_id(), data_id) {
        (true, None) => return Err(TopicError::MissingDataId(kind)),
        (true, Some(id)) => Some(id),
        (false, _) => None,
    };

    let length = topic_length(kind, base, device, data_id);
    let mut topic = String::with_capacity(length);
    topic.push_str(base);
    topic.push(SEPARATOR);
    topic.push_str(device);
    topic.push(SEPARATOR);
    topic.push_str(kind.keyword());
    if let Some(id) = data_id {
        topic.push(SEPARATOR);
        topic.push_str(id);
    }

    debug_assert_eq!(topic.len(), length);
    Ok(topic)
}

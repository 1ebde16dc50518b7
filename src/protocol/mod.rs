//! The `protocol` module implements the elastic-AI device convention on top
//! of any [`CommunicationEndpoint`](crate::endpoint::CommunicationEndpoint).
//!
//! - `topic`: the topic naming grammar.
//! - `status`: the `ID:..;TYPE:..;STATE:..;` status payload codec.
//! - `request`: request records passed to the facade.
//! - `facade`: [`Protocol`], one operation per message kind.
//! - `requester`: [`DataRequester`], a helper that pulls a data stream.

pub mod facade;
pub mod request;
pub mod requester;
pub mod status;
pub mod topic;

pub use facade::{Protocol, ProtocolConfig};
pub use request::{PubRequest, SubRequest};
pub use requester::{DataRequester, RequesterError};
pub use status::{DeviceState, DeviceStatus, DeviceType, ParsedStatus, StatusField};
pub use topic::MessageKind;

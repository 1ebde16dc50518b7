//! # eaip
//!
//! `eaip` implements the elastic-AI device communication convention on top
//! of a publish/subscribe transport. It derives topic names, encodes and
//! decodes status payloads and offers one operation per message kind. It
//! does no network I/O of its own; an in-process broker is included to run
//! the protocol end to end.
//!
//! ## Core Modules
//!
//! - `endpoint`: the transport capability set and its result codes.
//! - `protocol`: topic grammar, status codec and the protocol facade.
//! - `broker`: the in-process mock broker with wildcard matching.
//! - `config`: loading settings from files and environment.
//! - `utils`: shared error type and logging setup.

pub mod broker;
pub mod config;
pub mod endpoint;
pub mod protocol;
pub mod utils;

pub use broker::MockBroker;
pub use endpoint::{ComError, ComResult, CommunicationEndpoint, MessageHandler};
pub use protocol::{Protocol, ProtocolConfig};

//! The `error` module defines the error type of the `eaip` binary.
//!
//! Library operations report [`ComError`] or their own module errors; this
//! type gathers them together with configuration and output failures.

use config::ConfigError;
use thiserror::Error;

use crate::endpoint::ComError;
use crate::protocol::RequesterError;
use crate::protocol::topic::TopicError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("communication error: {0} (code {code:#04x})", code = .0.code())]
    Communication(#[from] ComError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Requester(#[from] RequesterError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid status field `{0}`, expected ID=VALUE")]
    InvalidField(String),
}

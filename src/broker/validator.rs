//! Topic validation
//!
//! Topics are checked against two grammars built from the same character
//! class (letters, digits and `_\!$&'()*,.:;=?@%~-`):
//!
//! - subscribe: `/`-separated levels, where `+` may appear anywhere, an
//!   optional trailing `/#` matches everything below, and a lone `+` is
//!   accepted as a whole pattern.
//! - publish: no `+` and no `#`; the first level must not be empty, a
//!   single trailing `/` is tolerated.
//!
//! Length is checked first so an oversized topic reports
//! [`ValidationError::TooLong`] no matter what it contains.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::endpoint::ComError;

/// Topic length limit of the ESP32 AT firmware.
pub const MAX_TOPIC_LENGTH: usize = 128;

const SUBSCRIBE_GRAMMAR: &str = r"^(/?[a-zA-Z0-9_\\!$\&'()*+,.:;=?@%\~\-]*(/[a-zA-Z0-9_\\!$\&'()*+,.:;=?@%\~\-]*)*(/\#)?|\+)$";
const PUBLISH_GRAMMAR: &str = r"^(/?[a-zA-Z0-9_\\!$\&'()*,.:;=?@%\~\-]+(/[a-zA-Z0-9_\\!$\&'()*,.:;=?@%\~\-]*)*/?)$";

static SUBSCRIBE_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(SUBSCRIBE_GRAMMAR));
static PUBLISH_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(PUBLISH_GRAMMAR));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Publish,
    Subscribe,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grammar::Publish => f.write_str("publish"),
            Grammar::Subscribe => f.write_str("subscribe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("topic is {length} bytes long, at most {max} are allowed")]
    TooLong { length: usize, max: usize },
    #[error("`{topic}` is not a valid {grammar} topic")]
    Invalid { topic: String, grammar: Grammar },
    #[error("{grammar} grammar unavailable: {source}")]
    Engine {
        grammar: Grammar,
        #[source]
        source: regex::Error,
    },
}

impl From<ValidationError> for ComError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::TooLong { .. } => ComError::TopicTooLong,
            ValidationError::Invalid { .. } => ComError::InvalidTopic,
            ValidationError::Engine { .. } => ComError::Generic,
        }
    }
}

pub fn check_length(topic: &str, max: usize) -> Result<(), ValidationError> {
    if topic.len() > max {
        return Err(ValidationError::TooLong {
            length: topic.len(),
            max,
        });
    }
    Ok(())
}

fn check_grammar(
    topic: &str,
    grammar: Grammar,
    pattern: &Result<Regex, regex::Error>,
) -> Result<(), ValidationError> {
    let regex = pattern.as_ref().map_err(|e| ValidationError::Engine {
        grammar,
        source: e.clone(),
    })?;
    if !regex.is_match(topic) {
        return Err(ValidationError::Invalid {
            topic: topic.to_string(),
            grammar,
        });
    }
    Ok(())
}

/// Checks a topic about to be published.
pub fn validate_publish(topic: &str, max_length: usize) -> Result<(), ValidationError> {
    check_length(topic, max_length)?;
    check_grammar(topic, Grammar::Publish, &PUBLISH_PATTERN)
}

/// Checks a pattern about to be subscribed.
pub fn validate_subscribe(topic: &str, max_length: usize) -> Result<(), ValidationError> {
    check_length(topic, max_length)?;
    check_grammar(topic, Grammar::Subscribe, &SUBSCRIBE_PATTERN)
}

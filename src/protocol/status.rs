//! Status payload codec
//!
//! A status payload is a flat list of `ID:VALUE;` pairs. The first three are
//! fixed:
//!
//! ```text
//! ID:{deviceId};TYPE:{APPLICATION|enV5};STATE:{ONLINE|OFFLINE};{id}:{value};...
//! ```
//!
//! Identifiers and values are written verbatim. A `:` or `;` inside one of
//! them corrupts the payload; callers must keep delimiters out of their
//! fields.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

const FIELD_ID: &str = "ID";
const FIELD_TYPE: &str = "TYPE";
const FIELD_STATE: &str = "STATE";

const KEY_SEPARATOR: char = ':';
const FIELD_TERMINATOR: char = ';';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceType {
    #[default]
    Application,
    Node,
}

impl DeviceType {
    pub const fn token(&self) -> &'static str {
        match self {
            DeviceType::Application => "APPLICATION",
            DeviceType::Node => "enV5",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceState {
    #[default]
    Offline,
    Online,
}

impl DeviceState {
    pub const fn token(&self) -> &'static str {
        match self {
            DeviceState::Offline => "OFFLINE",
            DeviceState::Online => "ONLINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} token `{token}`")]
pub struct UnknownToken {
    kind: &'static str,
    token: String,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DeviceType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPLICATION" => Ok(DeviceType::Application),
            "enV5" => Ok(DeviceType::Node),
            other => Err(UnknownToken {
                kind: "device type",
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DeviceState {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONLINE" => Ok(DeviceState::Online),
            "OFFLINE" => Ok(DeviceState::Offline),
            other => Err(UnknownToken {
                kind: "device state",
                token: other.to_string(),
            }),
        }
    }
}

/// One `id:value` pair of a status payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusField {
    pub id: String,
    pub value: String,
}

impl StatusField {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    fn encoded_len(&self) -> usize {
        self.id.len() + self.value.len() + 2
    }
}

/// Everything a device reports about itself in a STATUS message.
///
/// `additional_fields` are encoded in list order; repeated ids are all
/// written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub device_type: DeviceType,
    pub device_state: DeviceState,
    pub additional_fields: Vec<StatusField>,
}

impl DeviceStatus {
    pub fn new(device_type: DeviceType, device_state: DeviceState) -> Self {
        Self {
            device_type,
            device_state,
            additional_fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_fields.push(StatusField::new(id, value));
        self
    }
}

/// Exact length in bytes of the payload [`render_status`] builds.
pub fn status_length(device_id: &str, status: &DeviceStatus) -> usize {
    // three "KEY:VALUE;" pairs
    let fixed = FIELD_ID.len()
        + device_id.len()
        + FIELD_TYPE.len()
        + status.device_type.token().len()
        + FIELD_STATE.len()
        + status.device_state.token().len()
        + 6;

    fixed
        + status
            .additional_fields
            .iter()
            .map(StatusField::encoded_len)
            .sum::<usize>()
}

pub fn render_status(device_id: &str, status: &DeviceStatus) -> String {
    let length = status_length(device_id, status);
    let mut payload = String::with_capacity(length);

    push_field(&mut payload, FIELD_ID, device_id);
    push_field(&mut payload, FIELD_TYPE, status.device_type.token());
    push_field(&mut payload, FIELD_STATE, status.device_state.token());
    for field in &status.additional_fields {
        push_field(&mut payload, &field.id, &field.value);
    }

    debug_assert_eq!(payload.len(), length);
    payload
}

fn push_field(payload: &mut String, id: &str, value: &str) {
    payload.push_str(id);
    payload.push(KEY_SEPARATOR);
    payload.push_str(value);
    payload.push(FIELD_TERMINATOR);
}

/// A decoded status payload, fields in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedStatus {
    pub fields: Vec<StatusField>,
}

impl ParsedStatus {
    /// Value of `id`; the last occurrence wins when an id repeats.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
    }

    pub fn device_id(&self) -> Option<&str> {
        self.get(FIELD_ID)
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.get(FIELD_TYPE).and_then(|token| token.parse().ok())
    }

    pub fn device_state(&self) -> Option<DeviceState> {
        self.get(FIELD_STATE).and_then(|token| token.parse().ok())
    }
}

/// Splits a status payload back into its fields.
///
/// Blank fields are skipped and a field without `:` decodes to an empty
/// value. Never fails: garbage in yields odd fields out.
pub fn parse_status(payload: &str) -> ParsedStatus {
    let fields = payload
        .split(FIELD_TERMINATOR)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| match raw.split_once(KEY_SEPARATOR) {
            Some((id, value)) => StatusField::new(id, value),
            None => StatusField::new(raw, ""),
        })
        .collect();

    ParsedStatus { fields }
}

use serde::Deserialize;

use crate::broker::validator::MAX_TOPIC_LENGTH;
use crate::protocol::{DeviceType, ProtocolConfig};

/// Top-level configuration settings for the application.
///
/// Includes the identity of the local device, broker limits and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub device: DeviceSettings,
    pub broker: BrokerSettings,
    pub logging: LoggingSettings,
}

/// Identity of the local device.
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceSettings {
    pub id: String,
    pub base_url: String,
    pub device_type: DeviceKind,
}

/// Device type as written in configuration files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Application,
    Node,
}

impl From<DeviceKind> for DeviceType {
    fn from(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Application => DeviceType::Application,
            DeviceKind::Node => DeviceType::Node,
        }
    }
}

/// Configuration settings for the in-process broker.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub max_topic_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub device: Option<PartialDeviceSettings>,
    pub broker: Option<PartialBrokerSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialDeviceSettings {
    pub id: Option<String>,
    pub base_url: Option<String>,
    pub device_type: Option<DeviceKind>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub max_topic_length: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Settings {
    pub fn protocol_config(&self) -> ProtocolConfig {
        ProtocolConfig::new(self.device.id.clone(), self.device.base_url.clone())
    }
}

/// Provides default values for `Settings`.
///
/// The device id is random unless configured.
impl Default for Settings {
    fn default() -> Self {
        Self {
            device: DeviceSettings {
                id: format!("eaip-{}", uuid::Uuid::new_v4()),
                base_url: "eaip://uni-due.de".to_string(),
                device_type: DeviceKind::Application,
            },
            broker: BrokerSettings {
                max_topic_length: MAX_TOPIC_LENGTH,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, DeviceKind, DeviceSettings, LoggingSettings, Settings};

/// Loads the configuration from `.env`, the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the device, broker and logging configurations
///
/// Environment variables use the `EAIP` prefix and `__` between levels,
/// e.g. `EAIP_DEVICE__BASE_URL`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("EAIP")
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        device: DeviceSettings {
            id: partial
                .device
                .as_ref()
                .and_then(|d| d.id.clone())
                .unwrap_or(default.device.id),
            base_url: partial
                .device
                .as_ref()
                .and_then(|d| d.base_url.clone())
                .unwrap_or(default.device.base_url),
            device_type: partial
                .device
                .as_ref()
                .and_then(|d| d.device_type)
                .unwrap_or(default.device.device_type),
        },
        broker: BrokerSettings {
            max_topic_length: partial
                .broker
                .as_ref()
                .and_then(|b| b.max_topic_length)
                .unwrap_or(default.broker.max_topic_length),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}

//! CLI for eaip
//!
//! Subcommands:
//! - `topic`: print the topic for a message kind
//! - `status`: encode a status payload for the configured device
//! - `decode-status`: decode a status payload to JSON
//! - `demo`: run a two-device exchange over the in-process broker

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use eaip::config::{Settings, load_config};
use eaip::protocol::status::{parse_status, render_status};
use eaip::protocol::topic::render_topic;
use eaip::protocol::{
    DataRequester, DeviceState, DeviceStatus, DeviceType, MessageKind, PubRequest, SubRequest,
};
use eaip::utils::error::AppError;
use eaip::{MessageHandler, MockBroker, Protocol, ProtocolConfig};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "eaip")]
enum Command {
    /// Print the topic of a message kind
    Topic {
        /// STATUS, DATA, START, STOP, DO or DONE
        kind: MessageKind,
        /// Device the topic belongs to
        device: String,
        /// Data id or command, required for every kind except STATUS
        data_id: Option<String>,
    },
    /// Encode the status payload of the configured device
    Status {
        state: StateArg,
        /// Additional field, may be repeated
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,
    },
    /// Decode a status payload and print it as JSON
    DecodeStatus { payload: String },
    /// Run a two-device exchange over the in-process broker
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    Online,
    Offline,
}

impl From<StateArg> for DeviceState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Online => DeviceState::Online,
            StateArg::Offline => DeviceState::Offline,
        }
    }
}

fn main() {
    let cmd = Command::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            eaip::utils::logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    eaip::utils::logging::init(&settings.logging.level);

    if let Err(e) = run(cmd, &settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cmd: Command, settings: &Settings) -> Result<(), AppError> {
    match cmd {
        Command::Topic {
            kind,
            device,
            data_id,
        } => {
            let topic = render_topic(
                kind,
                &settings.device.base_url,
                &device,
                data_id.as_deref(),
            )?;
            println!("{topic}");
        }
        Command::Status { state, fields } => {
            let mut status = DeviceStatus::new(settings.device.device_type.into(), state.into());
            for field in fields {
                let (id, value) = field
                    .split_once('=')
                    .ok_or_else(|| AppError::InvalidField(field.clone()))?;
                status = status.with_field(id, value);
            }
            println!("{}", render_status(&settings.device.id, &status));
        }
        Command::DecodeStatus { payload } => {
            let parsed = parse_status(&payload);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Demo => run_demo(settings)?,
    }
    Ok(())
}

/// A sensor node and the configured application share one broker. The
/// application watches the sensor, requests a data stream and sends a
/// command; the sensor answers both.
fn run_demo(settings: &Settings) -> Result<(), AppError> {
    let broker = Arc::new(MockBroker::with_max_topic_length(
        settings.broker.max_topic_length,
    ));
    let base_url = settings.device.base_url.as_str();

    let app = Protocol::new(settings.protocol_config(), Arc::clone(&broker));
    let sensor = Arc::new(Protocol::new(
        ProtocolConfig::new("demo-sensor", base_url),
        Arc::clone(&broker),
    ));

    let sensor_for_start = Arc::clone(&sensor);
    let on_start: MessageHandler = Arc::new(move |topic, requester| {
        info!(%topic, %requester, "sensor: start requested");
        for value in ["21.5", "21.7", "21.6"] {
            let sample = PubRequest::own("temperature", value);
            if let Err(e) = sensor_for_start.publish_data(&sample) {
                error!("sensor: publishing data failed: {}", e);
            }
        }
    });
    sensor.subscribe_start(&SubRequest::own("temperature"), on_start)?;

    let sensor_for_do = Arc::clone(&sensor);
    let on_do: MessageHandler = Arc::new(move |topic, payload| {
        info!(%topic, %payload, "sensor: command received");
        if let Err(e) = sensor_for_do.publish_done(&PubRequest::own("calibrate", "SUCCESS")) {
            error!("sensor: publishing result failed: {}", e);
        }
    });
    sensor.subscribe_do(&SubRequest::own("calibrate"), on_do)?;

    let on_done: MessageHandler = Arc::new(|topic, result| {
        info!(%topic, %result, "app: command finished");
    });
    app.subscribe_done(&SubRequest::new("demo-sensor", "calibrate"), on_done)?;

    let requester = DataRequester::new(&app, "demo-sensor", "temperature")?;
    sensor.publish_status(&DeviceStatus::new(DeviceType::Node, DeviceState::Online))?;
    info!(state = %requester.target_state(), "app: sensor status");

    requester.start()?;
    while let Some(value) = requester.next_data() {
        info!(%value, "app: received temperature");
    }
    requester.stop()?;

    app.publish_do(&PubRequest::to("demo-sensor", "calibrate", "offset=0.1"))?;

    info!(subscriptions = broker.subscription_count(), "demo finished");
    Ok(())
}

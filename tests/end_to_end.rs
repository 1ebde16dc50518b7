use std::sync::Arc;

use eaip::endpoint::{ComError, result_code};
use eaip::protocol::status::parse_status;
use eaip::protocol::{
    DataRequester, DeviceState, DeviceStatus, DeviceType, PubRequest, SubRequest,
};
use eaip::{CommunicationEndpoint, MessageHandler, MockBroker, Protocol, ProtocolConfig};
use parking_lot::Mutex;

const BASE_URL: &str = "eaip://local-net";

type Inbox = Arc<Mutex<Vec<(String, String)>>>;

fn inbox() -> (MessageHandler, Inbox) {
    let messages: Inbox = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let handler: MessageHandler = Arc::new(move |topic, payload| {
        sink.lock().push((topic.to_string(), payload.to_string()));
    });
    (handler, messages)
}

fn device(id: &str, broker: &Arc<MockBroker>) -> Protocol<Arc<MockBroker>> {
    Protocol::new(ProtocolConfig::new(id, BASE_URL), Arc::clone(broker))
}

#[test]
fn integration_status_is_observed_by_name() {
    let broker = Arc::new(MockBroker::new());
    let app = device("app", &broker);
    let node = device("node-1", &broker);

    let (handler, statuses) = inbox();
    app.subscribe_status(&SubRequest::target("node-1"), handler)
        .unwrap();

    let status = DeviceStatus::new(DeviceType::Node, DeviceState::Online)
        .with_field("FW", "1.2.0");
    node.publish_status(&status).unwrap();

    let received = statuses.lock();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "eaip://local-net/node-1/STATUS");

    let parsed = parse_status(&received[0].1);
    assert_eq!(parsed.device_id(), Some("node-1"));
    assert_eq!(parsed.device_state(), Some(DeviceState::Online));
    assert_eq!(parsed.get("FW"), Some("1.2.0"));
}

#[test]
fn integration_command_round_trip() {
    let broker = Arc::new(MockBroker::new());
    let app = device("app", &broker);
    let node = Arc::new(device("node-1", &broker));

    let responder = Arc::clone(&node);
    node.subscribe_do(
        &SubRequest::own("blink"),
        Arc::new(move |_, payload| {
            let result = format!("blinked {payload}");
            responder
                .publish_done(&PubRequest::own("blink", result))
                .unwrap();
        }),
    )
    .unwrap();

    let (handler, results) = inbox();
    app.subscribe_done(&SubRequest::new("node-1", "blink"), handler)
        .unwrap();

    app.publish_do(&PubRequest::to("node-1", "blink", "3x"))
        .unwrap();

    assert_eq!(
        *results.lock(),
        vec![(
            "eaip://local-net/node-1/DONE/blink".to_string(),
            "blinked 3x".to_string()
        )]
    );
}

#[test]
fn integration_wildcard_observer_sees_all_data() {
    let broker = Arc::new(MockBroker::new());
    let a = device("a", &broker);
    let b = device("b", &broker);

    let (handler, seen) = inbox();
    broker.subscribe("eaip://local-net/+/DATA/#", handler).unwrap();

    a.publish_data(&PubRequest::own("t", "1")).unwrap();
    b.publish_data(&PubRequest::own("h", "2")).unwrap();
    a.publish_status(&DeviceStatus::default()).unwrap();

    let topics: Vec<String> = seen.lock().iter().map(|(t, _)| t.clone()).collect();
    assert_eq!(
        topics,
        vec!["eaip://local-net/a/DATA/t", "eaip://local-net/b/DATA/h"]
    );
}

#[test]
fn integration_data_requester_stream() {
    let broker = Arc::new(MockBroker::new());
    let app = device("app", &broker);
    let sensor = Arc::new(device("sensor", &broker));

    let producer = Arc::clone(&sensor);
    sensor
        .subscribe_start(
            &SubRequest::own("temp"),
            Arc::new(move |_, requester| {
                assert_eq!(requester, "eaip://local-net/app");
                producer
                    .publish_data(&PubRequest::own("temp", "20.0"))
                    .unwrap();
            }),
        )
        .unwrap();

    let requester = DataRequester::new(&app, "sensor", "temp").unwrap();
    sensor
        .publish_status(&DeviceStatus::new(DeviceType::Node, DeviceState::Online))
        .unwrap();

    requester.start().unwrap();
    assert_eq!(requester.next_data().as_deref(), Some("20.0"));
    requester.stop().unwrap();

    drop(requester);
    assert_eq!(
        broker.subscribed_topics(),
        vec!["eaip://local-net/sensor/START/temp"]
    );
}

#[test]
fn integration_error_codes_reach_the_caller() {
    let broker = Arc::new(MockBroker::new());
    let app = device("app", &broker);

    let duplicate = SubRequest::target("x");
    assert_eq!(result_code(&app.subscribe_status(&duplicate, inbox().0)), 0x00);
    let second = app.subscribe_status(&duplicate, inbox().0);
    assert_eq!(second, Err(ComError::TopicAlreadySubscribed));
    assert_eq!(result_code(&second), 0x13);

    let wildcard_target = PubRequest::to("+", "x", "");
    assert_eq!(
        result_code(&app.publish_start(&wildcard_target)),
        ComError::InvalidTopic.code()
    );

    assert_eq!(app.unsubscribe_data(&SubRequest::new("never", "seen")), Ok(()));
}

//! Integration tests for the NodeService → ports pipeline, driven without
//! the scheduler so every port call can be observed directly.

use climate_node::adapters::log_sink::RecordingSink;
use climate_node::app::events::{AppEvent, SensorKind};
use climate_node::app::ports::{LedMode, SensorDriver, SensorEvent};
use climate_node::app::service::NodeService;
use climate_node::config::NodeConfig;
use climate_node::error::SensorError;
use climate_node::scheduler::{Scheduler, TaskId};
use climate_node::sensors::SimulatedSensor;

use crate::mock_hw::{LedCall, MockLed, MockRadio, MockWake};

fn make_service() -> (NodeService, TaskId) {
    let mut sched = Scheduler::new();
    let task = sched.register("threshold", 0).unwrap();
    (NodeService::new(NodeConfig::default(), task).unwrap(), task)
}

#[test]
fn start_pulses_led_and_requests_pairing() {
    let (mut app, _) = make_service();
    let mut led = MockLed::new();
    let mut radio = MockRadio::new();
    let mut sink = RecordingSink::new();

    app.start(&mut led, &mut radio, &mut sink);

    assert_eq!(led.calls, vec![LedCall::Pulse(2_000)]);
    assert_eq!(radio.calls.len(), 2);
    assert!(matches!(sink.events.last(), Some(AppEvent::Started { .. })));
}

#[test]
fn temperature_update_publishes_and_wakes_monitor() {
    let (mut app, task) = make_service();
    let mut radio = MockRadio::new();
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();
    let mut sensor = SimulatedSensor::new(|_| Ok(21.5_f32));

    let event = sensor.measure(0);
    let publication = app
        .on_temperature_event(event, &sensor, 0, &mut radio, &mut wake, &mut sink)
        .unwrap();

    assert_eq!(publication.sensor, SensorKind::Temperature);
    assert_eq!(publication.tick, 0);
    assert_eq!(wake.woken, vec![task]);
    assert_eq!(radio.temperatures(), vec![21.5]);
    assert_eq!(sink.events, vec![AppEvent::Published(publication)]);
    assert_eq!(app.publications(), 1);
    assert_eq!(app.temperature().channel().next_allowed_publish_tick(), 900_000);
}

#[test]
fn unchanged_reading_is_filtered() {
    let (mut app, _) = make_service();
    let mut radio = MockRadio::new();
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();
    let mut sensor = SimulatedSensor::new(|_| Ok(800.0_f32));

    for now in [0, 60_000, 120_000] {
        let event = sensor.measure(now);
        app.on_co2_event(event, &sensor, now, &mut radio, &mut wake, &mut sink);
    }

    assert_eq!(radio.co2(), vec![800.0]);
    assert_eq!(wake.woken.len(), 1);
    assert_eq!(app.co2().channel().last_published_value(), 800.0);
}

#[test]
fn driver_error_leaves_state_untouched() {
    let (mut app, _) = make_service();
    let mut radio = MockRadio::new();
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();
    let mut sensor = SimulatedSensor::<u16, _>::new(|_| Err(SensorError::BusFault));

    let event = sensor.measure(5_000);
    assert_eq!(event, SensorEvent::Error);
    let publication = app.on_voc_event(event, &sensor, 5_000, &mut radio, &mut wake, &mut sink);

    assert!(publication.is_none());
    assert!(radio.calls.is_empty());
    assert!(wake.woken.is_empty());
    assert!(sink.events.is_empty());
    assert_eq!(app.voc().channel().next_allowed_publish_tick(), 0);
}

#[test]
fn update_without_value_is_ignored() {
    let (mut app, _) = make_service();
    let mut radio = MockRadio::new();
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();
    let mut sensor = SimulatedSensor::<f32, _>::new(|_| Err(SensorError::NoValidValue));

    let event = sensor.measure(0);
    assert_eq!(event, SensorEvent::Update);
    assert!(
        app.on_temperature_event(event, &sensor, 0, &mut radio, &mut wake, &mut sink)
            .is_none()
    );
    assert!(radio.calls.is_empty());
    assert_eq!(app.latest().temperature, 0.0);
}

#[test]
fn refused_publish_still_commits() {
    let (mut app, _) = make_service();
    let mut radio = MockRadio::new();
    radio.refuse = true;
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();
    let mut sensor = SimulatedSensor::new(|_| Ok(70_u16));

    let event = sensor.measure(0);
    assert!(
        app.on_voc_event(event, &sensor, 0, &mut radio, &mut wake, &mut sink)
            .is_some()
    );
    assert_eq!(app.latest().tvoc, 70.0);
    assert_eq!(app.voc().channel().last_published_value(), 70);
}

#[test]
fn threshold_tick_reports_only_changes() {
    let (mut app, _) = make_service();
    let mut led = MockLed::new();
    let mut radio = MockRadio::new();
    let mut wake = MockWake::default();
    let mut sink = RecordingSink::new();

    assert!(!app.threshold_tick(&mut led, &mut sink));
    assert!(!app.threshold_tick(&mut led, &mut sink));

    let mut sensor = SimulatedSensor::new(|_| Ok(1_200.0_f32));
    let event = sensor.measure(0);
    app.on_co2_event(event, &sensor, 0, &mut radio, &mut wake, &mut sink);
    assert!(app.threshold_tick(&mut led, &mut sink));

    assert_eq!(led.last_mode(), Some(LedMode::On));
    assert_eq!(app.context().led_mode, Some(LedMode::On));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::LimitChanged { .. })),
        2
    );
}

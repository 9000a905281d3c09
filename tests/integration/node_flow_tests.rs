//! End-to-end tests: scheduler → sensor tasks → publish filters → radio,
//! and publish → threshold task → LED.
//!
//! Time is simulated; `run_until` dispatches every task at its planned tick.

use climate_node::app::events::{AppEvent, SensorKind};
use climate_node::app::ports::{LedMode, RadioChannel, RadioMode};
use climate_node::app::service::FIRMWARE_VERSION;
use climate_node::config::VOC_TOPIC;

use crate::mock_hw::{RadioCall, build_node, constant, offline, source};

const MINUTE_MS: u64 = 60_000;

// ── Publish filter through the runtime ────────────────────────

#[test]
fn temperature_publishes_first_value_and_accumulated_drift() {
    let mut node = build_node(
        source(|t| {
            Ok(match t {
                0 => 20.0,
                2_000 => 20.1,
                _ => 20.3,
            })
        }),
        offline(),
        offline(),
    );

    node.run_until(4_000);

    let radio = &node.peripherals().radio;
    assert_eq!(radio.temperatures(), vec![20.0, 20.3]);
    assert!(radio.calls.iter().all(|c| matches!(
        c,
        RadioCall::Temperature(RadioChannel::R1I2c0AddressAlternate, _)
    )));
    assert!((node.service().latest().temperature - 20.3).abs() < f32::EPSILON);
}

#[test]
fn constant_co2_republishes_after_quiet_interval() {
    let mut node = build_node(offline(), constant(400.0), offline());

    node.run_until(16 * MINUTE_MS + 30_000);

    let hw = node.peripherals();
    assert_eq!(hw.radio.co2(), vec![400.0, 400.0]);

    let ticks: Vec<u64> = hw
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Published(p) if p.sensor == SensorKind::Co2 => Some(p.tick),
            _ => None,
        })
        .collect();
    // Deadline is 15 min; the first sample strictly after it is at 16 min.
    assert_eq!(ticks, vec![0, 16 * MINUTE_MS]);
    assert_eq!(hw.co2.samples(), 17);
}

#[test]
fn voc_goes_out_as_integer_on_its_topic() {
    let mut node = build_node(offline(), offline(), constant(42));

    node.run_until(MINUTE_MS);

    assert_eq!(
        node.peripherals().radio.ints(),
        vec![(VOC_TOPIC.to_owned(), 42)]
    );
    assert!((node.service().latest().tvoc - 42.0).abs() < f32::EPSILON);
}

#[test]
fn failing_sensors_have_no_side_effects() {
    let mut node = build_node(offline(), offline(), offline());

    node.run_until(20 * MINUTE_MS);

    let hw = node.peripherals();
    assert!(hw.radio.calls.is_empty());
    assert_eq!(
        hw.sink.count(|e| matches!(e, AppEvent::Published(_))),
        0
    );
    assert_eq!(*node.service().latest(), Default::default());
    assert_eq!(node.service().publications(), 0);
    assert_eq!(node.service().context().led_mode, Some(LedMode::Off));
    assert!(!hw.led.is_lit());
}

// ── Threshold monitor and LED ─────────────────────────────────

#[test]
fn warm_room_lights_led_until_it_cools() {
    let mut node = build_node(
        source(|t| Ok(if t < MINUTE_MS { 26.0 } else { 24.0 })),
        offline(),
        offline(),
    );

    node.run_until(1_000);
    assert_eq!(node.service().context().led_mode, Some(LedMode::On));
    assert!(node.peripherals().led.is_lit());

    node.run_until(MINUTE_MS + 1_000);
    assert_eq!(node.service().context().led_mode, Some(LedMode::Off));
    assert!(!node.peripherals().led.is_lit());

    let changes: Vec<bool> = node
        .peripherals()
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::LimitChanged { exceeded } => Some(*exceeded),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![false, true, false]);
}

#[test]
fn high_tvoc_alone_lights_led() {
    let mut node = build_node(offline(), offline(), constant(65));

    node.run_until(2_000);

    assert_eq!(node.service().context().led_mode, Some(LedMode::On));
    assert!(node.peripherals().led.is_lit());
}

#[test]
fn publish_wakes_threshold_task_in_same_tick() {
    // First threshold run at tick 0 sees nothing; the temperature publish
    // at tick 0 wakes it again before time moves.
    let mut node = build_node(constant(30.0), offline(), offline());

    node.run_until(0);

    assert_eq!(node.service().context().led_mode, Some(LedMode::On));
    // Threshold re-planned one period after the tick; nothing else sooner.
    assert_eq!(node.next_wakeup(), Some(1_000));
}

// ── Boot sequence ─────────────────────────────────────────────

#[test]
fn start_pairs_and_pulses_led() {
    let mut node = build_node(offline(), offline(), offline());

    node.start();

    let radio = &node.peripherals().radio;
    assert_eq!(radio.calls[0], RadioCall::Init(RadioMode::NodeSleeping));
    assert_eq!(
        radio.calls[1],
        RadioCall::Pairing {
            name: "room".to_owned(),
            version: FIRMWARE_VERSION.to_owned(),
        }
    );
    assert_eq!(radio.calls.len(), 2);

    let sink = &node.peripherals().sink;
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::PairingRequested { name } if name.as_str() == "room")),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started { .. })), 1);

    // Boot pulse holds the LED high even though no limit is exceeded.
    node.run_until(1_000);
    assert!(node.peripherals().led.is_lit());
    assert!(node.peripherals().led.is_pulsing());

    node.run_until(2_500);
    assert!(!node.peripherals().led.is_lit());
    assert_eq!(node.peripherals().led.mode(), LedMode::Off);
}

#[test]
fn refused_pairing_still_starts() {
    let mut node = build_node(offline(), offline(), offline());
    node.peripherals_mut().radio.refuse = true;

    node.start();

    let sink = &node.peripherals().sink;
    assert_eq!(sink.count(|e| matches!(e, AppEvent::PairingRequested { .. })), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started { .. })), 1);
}

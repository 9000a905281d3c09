//! Mock platform adapters for integration tests.
//!
//! Records every radio and LED call so tests can assert on the full
//! history without a radio stack or GPIO.

use climate_node::adapters::log_sink::RecordingSink;
use climate_node::app::ports::{LedMode, LedPort, RadioChannel, RadioMode, RadioPort, WakePort};
use climate_node::config::NodeConfig;
use climate_node::drivers::status_led::{SimPin, StatusLed};
use climate_node::error::{RadioError, SensorError};
use climate_node::node::{Node, Peripherals};
use climate_node::scheduler::{TaskId, Tick};
use climate_node::sensors::SimulatedSensor;

// ── Radio call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RadioCall {
    Init(RadioMode),
    Pairing { name: String, version: String },
    Temperature(RadioChannel, f32),
    Co2(f32),
    Int(String, i32),
}

// ── MockRadio ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRadio {
    pub calls: Vec<RadioCall>,
    /// Refuse every publish with `QueueFull`.
    pub refuse: bool,
}

#[allow(dead_code)]
impl MockRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RadioCall::Temperature(_, v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn co2(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RadioCall::Co2(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn ints(&self) -> Vec<(String, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RadioCall::Int(t, v) => Some((t.clone(), *v)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: RadioCall) -> Result<(), RadioError> {
        if self.refuse {
            return Err(RadioError::QueueFull);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RadioPort for MockRadio {
    fn init(&mut self, mode: RadioMode) {
        self.calls.push(RadioCall::Init(mode));
    }

    fn pairing_request(&mut self, name: &str, version: &str) -> Result<(), RadioError> {
        self.record(RadioCall::Pairing {
            name: name.to_owned(),
            version: version.to_owned(),
        })
    }

    fn pub_temperature(&mut self, channel: RadioChannel, celsius: f32) -> Result<(), RadioError> {
        self.record(RadioCall::Temperature(channel, celsius))
    }

    fn pub_co2(&mut self, ppm: f32) -> Result<(), RadioError> {
        self.record(RadioCall::Co2(ppm))
    }

    fn pub_int(&mut self, topic: &str, value: i32) -> Result<(), RadioError> {
        self.record(RadioCall::Int(topic.to_owned(), value))
    }
}

// ── MockLed / MockWake ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedCall {
    Mode(LedMode),
    Pulse(u32),
}

#[derive(Default)]
pub struct MockLed {
    pub calls: Vec<LedCall>,
}

#[allow(dead_code)]
impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_mode(&self) -> Option<LedMode> {
        self.calls.iter().rev().find_map(|c| match c {
            LedCall::Mode(m) => Some(*m),
            LedCall::Pulse(_) => None,
        })
    }
}

impl LedPort for MockLed {
    fn set_mode(&mut self, mode: LedMode) {
        self.calls.push(LedCall::Mode(mode));
    }

    fn pulse(&mut self, duration_ms: u32) {
        self.calls.push(LedCall::Pulse(duration_ms));
    }
}

#[derive(Default)]
pub struct MockWake {
    pub woken: Vec<TaskId>,
}

impl WakePort for MockWake {
    fn plan_now(&mut self, task: TaskId) {
        self.woken.push(task);
    }
}

// ── Node builder ──────────────────────────────────────────────

pub type Source<V> = Box<dyn FnMut(Tick) -> Result<V, SensorError>>;

pub type TestNode = Node<
    SimulatedSensor<f32, Source<f32>>,
    SimulatedSensor<f32, Source<f32>>,
    SimulatedSensor<u16, Source<u16>>,
    MockRadio,
    SimPin,
    RecordingSink,
>;

pub fn source<V: Copy + 'static>(
    f: impl FnMut(Tick) -> Result<V, SensorError> + 'static,
) -> Source<V> {
    Box::new(f)
}

/// A source whose driver never produces a reading.
pub fn offline<V: Copy + 'static>() -> Source<V> {
    Box::new(|_| Err(SensorError::NotReady))
}

pub fn constant<V: Copy + 'static>(v: V) -> Source<V> {
    Box::new(move |_| Ok(v))
}

pub fn build_node(temperature: Source<f32>, co2: Source<f32>, voc: Source<u16>) -> TestNode {
    let hw = Peripherals {
        temperature: SimulatedSensor::new(temperature),
        co2: SimulatedSensor::new(co2),
        voc: SimulatedSensor::new(voc),
        radio: MockRadio::new(),
        led: StatusLed::new(SimPin::new()),
        sink: RecordingSink::new(),
    };
    Node::new(NodeConfig::default(), hw).unwrap()
}

//! Port traits — the boundary between the node's domain logic and the SDK.
//!
//! ```text
//!   Sensor driver ──▶ SensorObserver ──▶ NodeService ──▶ RadioPort
//!                                             │
//!                                             ├──▶ WakePort (scheduler)
//!                                             └──▶ LedPort, EventSink
//! ```
//!
//! Platform pieces (sensor drivers, radio stack, cooperative scheduler, LED
//! GPIO) implement these traits. The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every path is testable with mock adapters.

use serde::{Deserialize, Serialize};

use crate::error::{RadioError, SensorError};
use crate::scheduler::{TaskId, Tick};

// ───────────────────────────────────────────────────────────────
// Sensor driver port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Event a driver raises at the end of each sampling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEvent {
    /// A measurement cycle completed; query [`SensorDriver::value`].
    Update,
    /// The measurement cycle failed.
    Error,
}

/// A sampling sensor driver owned by the platform.
///
/// The driver runs one measurement per sampling interval and reports the
/// outcome as a [`SensorEvent`]. Even after `Update` the value query may
/// fail; callers treat that the same as an `Error` event.
pub trait SensorDriver {
    type Value: Copy;

    /// Run one measurement cycle at `now`.
    fn measure(&mut self, now: Tick) -> SensorEvent;

    /// Latest measured value.
    fn value(&self) -> Result<Self::Value, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain → radio stack)
// ───────────────────────────────────────────────────────────────

/// Radio role requested at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioMode {
    /// Low-power node that wakes only to transmit.
    NodeSleeping,
    /// Node that keeps its receiver listening.
    NodeListening,
}

/// Logical publish channel, named by the I2C bus and address of the
/// producing sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioChannel {
    R1I2c0AddressDefault,
    R1I2c0AddressAlternate,
    R1I2c1AddressDefault,
    R1I2c1AddressAlternate,
}

/// Where a sensor channel's readings go on air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadioTarget {
    /// Temperature publish on a logical channel.
    Temperature(RadioChannel),
    /// The radio stack's implicit CO2 channel.
    Co2,
    /// Integer publish on a named topic.
    Topic(&'static str),
}

impl RadioTarget {
    /// Hand `value` to the radio on this target. Topic publishes carry the
    /// value rounded to an integer.
    pub fn send<R: RadioPort + ?Sized>(self, radio: &mut R, value: f32) -> Result<(), RadioError> {
        match self {
            Self::Temperature(channel) => radio.pub_temperature(channel, value),
            Self::Co2 => radio.pub_co2(value),
            Self::Topic(topic) => radio.pub_int(topic, value.round() as i32),
        }
    }
}

/// Write-side port for the radio stack.
///
/// Payload encoding, retries and pairing handshakes are the stack's job.
pub trait RadioPort {
    /// Bring the radio up in the given role.
    fn init(&mut self, mode: RadioMode);

    /// One-time pairing request carrying the room name and firmware version.
    fn pairing_request(&mut self, name: &str, version: &str) -> Result<(), RadioError>;

    fn pub_temperature(&mut self, channel: RadioChannel, celsius: f32) -> Result<(), RadioError>;

    fn pub_co2(&mut self, ppm: f32) -> Result<(), RadioError>;

    fn pub_int(&mut self, topic: &str, value: i32) -> Result<(), RadioError>;
}

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: domain → GPIO)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedMode {
    Off,
    On,
}

impl From<bool> for LedMode {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Binary status LED.
pub trait LedPort {
    fn set_mode(&mut self, mode: LedMode);

    /// Light the LED for `duration_ms` regardless of mode, then fall back to
    /// the current mode.
    fn pulse(&mut self, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Scheduler wake port
// ───────────────────────────────────────────────────────────────

/// Lets a callback ask the cooperative scheduler to run a task as soon as
/// the current one returns.
pub trait WakePort {
    fn plan_now(&mut self, task: TaskId);
}

/// Receives tasks the [`Scheduler`](crate::scheduler::Scheduler) found due.
///
/// The handler gets the scheduler back so a task can re-plan itself or wake
/// another task while it runs.
pub trait TaskHandler {
    fn run_task(&mut self, task: TaskId, sched: &mut crate::scheduler::Scheduler);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Sensor observer (driver callback → domain)
// ───────────────────────────────────────────────────────────────

/// Per-sensor callback invoked synchronously by the scheduler after a
/// driver finished a sampling cycle. One method per [`SensorEvent`].
pub trait SensorObserver<D: SensorDriver> {
    /// Returns the publication when the reading went on air.
    fn on_update<R, W>(
        &mut self,
        driver: &D,
        now: Tick,
        ctx: &mut super::context::AppContext,
        radio: &mut R,
        wake: &mut W,
    ) -> Option<super::events::Publication>
    where
        R: RadioPort,
        W: WakePort;

    /// A failed cycle is absorbed; the next sampling interval retries.
    fn on_error(&mut self, _driver: &D) {}
}

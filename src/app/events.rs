//! Outbound application events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log to serial, count them in a test, etc.

use serde::Serialize;

use crate::scheduler::Tick;

/// The three measured sensor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorKind {
    Temperature,
    Co2,
    Voc,
}

impl SensorKind {
    /// Unit suffix used in log lines.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "\u{00b0}C",
            Self::Co2 => "ppm",
            Self::Voc => "ppb",
        }
    }
}

/// A reading that passed the publish filter and went on air.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Publication {
    pub sensor: SensorKind,
    pub value: f32,
    /// Spin tick of the sampling task that published.
    pub tick: Tick,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AppEvent {
    /// Boot wiring finished; carries the firmware version.
    Started { version: &'static str },

    /// Pairing request handed to the radio stack.
    PairingRequested { name: heapless::String<16> },

    /// A sensor reading was published.
    Published(Publication),

    /// The aggregate threshold decision flipped.
    LimitChanged { exceeded: bool },
}

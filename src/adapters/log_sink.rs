//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (UART on target, stderr on host).

use log::{info, trace, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { version } => {
                info!("START | firmware v{}", version);
            }
            AppEvent::PairingRequested { name } => {
                info!("PAIR  | requested for '{}'", name);
            }
            AppEvent::Published(p) => {
                trace!(
                    "PUB   | {:?} = {:.2}{} @ {}ms",
                    p.sensor,
                    p.value,
                    p.sensor.unit(),
                    p.tick
                );
            }
            AppEvent::LimitChanged { exceeded: true } => {
                warn!("LIMIT | exceeded, LED on");
            }
            AppEvent::LimitChanged { exceeded: false } => {
                info!("LIMIT | nominal, LED off");
            }
        }
    }
}

/// Sink that keeps every event, for tests and the simulation summary.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

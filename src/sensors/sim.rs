//! Simulated sampling driver.
//!
//! Stands in for the platform's sensor drivers on host builds and in tests.
//! The measurement comes from a source closure evaluated at the sampling
//! tick, so a test can script an entire trace (`|t| Ok(if t < 60_000 {
//! 26.0 } else { 24.0 })`) and the simulation binary can feed a waveform.
//!
//! Failure modes map the way real drivers report them:
//!
//! | Source returns            | Event    | `value()`            |
//! |---------------------------|----------|----------------------|
//! | `Ok(v)`                   | `Update` | `Ok(v)`              |
//! | `Err(NoValidValue)`       | `Update` | `Err(NoValidValue)`  |
//! | `Err(BusFault / NotReady)`| `Error`  | `Err(..)`            |

use crate::app::ports::{SensorDriver, SensorEvent};
use crate::error::SensorError;
use crate::scheduler::Tick;

pub struct SimulatedSensor<V, F> {
    source: F,
    last: Result<V, SensorError>,
    samples: u32,
}

impl<V, F> SimulatedSensor<V, F>
where
    V: Copy,
    F: FnMut(Tick) -> Result<V, SensorError>,
{
    pub fn new(source: F) -> Self {
        Self {
            source,
            last: Err(SensorError::NotReady),
            samples: 0,
        }
    }

    /// Number of measurement cycles run so far.
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl<V, F> SensorDriver for SimulatedSensor<V, F>
where
    V: Copy,
    F: FnMut(Tick) -> Result<V, SensorError>,
{
    type Value = V;

    fn measure(&mut self, now: Tick) -> SensorEvent {
        self.samples = self.samples.saturating_add(1);
        self.last = (self.source)(now);
        match self.last {
            Ok(_) | Err(SensorError::NoValidValue) => SensorEvent::Update,
            Err(_) => SensorEvent::Error,
        }
    }

    fn value(&self) -> Result<V, SensorError> {
        self.last
    }
}

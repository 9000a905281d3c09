//! Threshold monitor.
//!
//! Runs on every periodic task tick and reduces the latest readings to a
//! single "limit exceeded" flag for the status LED. The decision is purely
//! level-triggered: each evaluation only looks at the current readings, so
//! a value back at or under its limit turns the LED off on the very next
//! tick.

use log::info;

use crate::app::context::LatestReadings;
use crate::config::ThresholdLimits;

/// Threshold monitor.
pub struct ThresholdMonitor {
    limits: ThresholdLimits,
    /// Result of the previous evaluation, for change logging only.
    last: Option<bool>,
}

impl ThresholdMonitor {
    pub fn new(limits: ThresholdLimits) -> Self {
        Self { limits, last: None }
    }

    /// True if any reading is strictly above its limit.
    pub fn limit_exceeded(&self, latest: &LatestReadings) -> bool {
        latest.temperature > self.limits.temperature_c
            || latest.co2_concentration > self.limits.co2_ppm
            || latest.tvoc > self.limits.tvoc_ppb
    }

    /// Evaluate and return `(exceeded, changed)`.
    ///
    /// `changed` is true on the first evaluation and whenever the flag flips.
    pub fn evaluate(&mut self, latest: &LatestReadings) -> (bool, bool) {
        let exceeded = self.limit_exceeded(latest);
        let changed = self.last != Some(exceeded);
        if changed {
            info!(
                "LIMIT | exceeded={} | T={:.2}\u{00b0}C CO2={:.0}ppm TVOC={:.0}ppb",
                exceeded, latest.temperature, latest.co2_concentration, latest.tvoc
            );
        }
        self.last = Some(exceeded);
        (exceeded, changed)
    }
}

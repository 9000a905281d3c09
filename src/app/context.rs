//! Application context owned by the node service.
//!
//! `AppContext` is the one struct every sensor callback and the periodic
//! task borrow mutably. The scheduler never runs two of them at once, so a
//! plain `&mut` is all the synchronisation it needs.

use serde::{Deserialize, Serialize};

use super::ports::LedMode;

/// Latest published value of every quantity the node knows about.
///
/// Only the three measured channels are written; the rest stay at zero
/// until a board revision carries the matching sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestReadings {
    /// Temperature (°C).
    pub temperature: f32,
    /// CO2 concentration (ppm).
    pub co2_concentration: f32,
    /// Total volatile organic compounds (ppb).
    pub tvoc: f32,

    pub humidity: f32,
    pub pressure: f32,
    pub altitude: f32,
    pub battery_voltage: f32,
    pub battery_pct: f32,
}

/// Mutable application state, owned by the service and lent to whichever
/// callback is running.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub latest: LatestReadings,
    /// Mode last commanded on the status LED, `None` before the first
    /// threshold evaluation.
    pub led_mode: Option<LedMode>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Node configuration parameters
//!
//! All tunables are compile-time defaults. [`NodeConfig`] bundles them so the
//! service and the runtime read a single value, and so tests can tighten
//! intervals without touching the constants.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Milliseconds in one minute.
const MINUTE_MS: u64 = 60 * 1000;

// --- Temperature (TMP112) ---
pub const TMP112_PUB_NO_CHANGE_INTERVAL_MS: u64 = 15 * MINUTE_MS;
pub const TMP112_PUB_VALUE_CHANGE: f32 = 0.2;
pub const TMP112_UPDATE_INTERVAL_MS: u64 = 2 * 1000;

// --- CO2 module ---
pub const CO2_PUB_NO_CHANGE_INTERVAL_MS: u64 = 15 * MINUTE_MS;
pub const CO2_PUB_VALUE_CHANGE: f32 = 50.0;
pub const CO2_UPDATE_INTERVAL_MS: u64 = MINUTE_MS;

// --- VOC sensor ---
pub const VOC_PUB_NO_CHANGE_INTERVAL_MS: u64 = 15 * MINUTE_MS;
pub const VOC_PUB_VALUE_CHANGE: f32 = 1.0;
pub const VOC_UPDATE_INTERVAL_MS: u64 = 5 * 1000;

/// Radio topic carrying the VOC reading.
pub const VOC_TOPIC: &str = "voc-lp-sensor/0:0/tvoc";

/// Room name sent with the boot pairing request.
pub const PAIRING_NAME: &str = "room";

/// Publish policy for a single sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublishPolicy {
    /// Minimum absolute change (in sensor units) that triggers a publish.
    pub value_change: f32,
    /// Maximum silence before a reading is re-published unchanged.
    pub no_change_interval_ms: u64,
    /// Driver sampling interval.
    pub update_interval_ms: u64,
}

impl PublishPolicy {
    pub const TEMPERATURE: Self = Self {
        value_change: TMP112_PUB_VALUE_CHANGE,
        no_change_interval_ms: TMP112_PUB_NO_CHANGE_INTERVAL_MS,
        update_interval_ms: TMP112_UPDATE_INTERVAL_MS,
    };

    pub const CO2: Self = Self {
        value_change: CO2_PUB_VALUE_CHANGE,
        no_change_interval_ms: CO2_PUB_NO_CHANGE_INTERVAL_MS,
        update_interval_ms: CO2_UPDATE_INTERVAL_MS,
    };

    pub const VOC: Self = Self {
        value_change: VOC_PUB_VALUE_CHANGE,
        no_change_interval_ms: VOC_PUB_NO_CHANGE_INTERVAL_MS,
        update_interval_ms: VOC_UPDATE_INTERVAL_MS,
    };

    fn validate(&self, which: &'static str) -> Result<()> {
        if !self.value_change.is_finite() || self.value_change <= 0.0 {
            return Err(Error::Config(which));
        }
        if self.no_change_interval_ms == 0 || self.update_interval_ms == 0 {
            return Err(Error::Config(which));
        }
        Ok(())
    }
}

/// Aggregate limits evaluated by the threshold monitor.
///
/// A reading strictly above its limit counts as a breach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLimits {
    pub temperature_c: f32,
    pub co2_ppm: f32,
    pub tvoc_ppb: f32,
}

impl Default for ThresholdLimits {
    fn default() -> Self {
        Self {
            temperature_c: 25.0,
            co2_ppm: 1000.0,
            tvoc_ppb: 60.0,
        }
    }
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Publish filtering ---
    pub temperature: PublishPolicy,
    pub co2: PublishPolicy,
    pub voc: PublishPolicy,

    // --- Threshold monitor ---
    pub limits: ThresholdLimits,
    /// Period of the threshold/LED task (milliseconds)
    pub monitor_interval_ms: u64,

    // --- Boot ---
    /// Length of the LED pulse issued at boot (milliseconds)
    pub boot_pulse_ms: u32,
    /// Room name carried by the pairing request
    pub pairing_name: heapless::String<16>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut pairing_name = heapless::String::new();
        // PAIRING_NAME is shorter than the capacity.
        let _ = pairing_name.push_str(PAIRING_NAME);

        Self {
            temperature: PublishPolicy::TEMPERATURE,
            co2: PublishPolicy::CO2,
            voc: PublishPolicy::VOC,

            limits: ThresholdLimits::default(),
            monitor_interval_ms: 1000, // 1 Hz

            boot_pulse_ms: 2000,
            pairing_name,
        }
    }
}

impl NodeConfig {
    /// Reject values that would silence or flood the radio.
    pub fn validate(&self) -> Result<()> {
        self.temperature.validate("temperature policy")?;
        self.co2.validate("co2 policy")?;
        self.voc.validate("voc policy")?;

        if self.monitor_interval_ms == 0 {
            return Err(Error::Config("monitor interval must be non-zero"));
        }
        if self.pairing_name.is_empty() {
            return Err(Error::Config("pairing name must not be empty"));
        }
        if !self.pairing_name.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            return Err(Error::Config("pairing name must be printable ASCII"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override (all fields required).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed config JSON"))?;
        config.validate()?;
        Ok(config)
    }
}

//! Binary status LED driver.
//!
//! Drives one active-high GPIO through `embedded_hal::digital::OutputPin`.
//! Besides the steady on/off mode the LED supports a timed pulse (used once
//! at boot): while a pulse is running the pin stays high, and when it ends
//! the pin falls back to whatever mode was set in the meantime.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal::gpio::PinDriver` in output mode.
//! On host/test: [`SimPin`] tracks the level in memory.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::app::ports::{LedMode, LedPort};
use crate::scheduler::Tick;

pub struct StatusLed<P> {
    pin: P,
    mode: LedMode,
    /// Tick at which a running pulse ends.
    pulse_until: Option<Tick>,
    now: Tick,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(pin: P) -> Self {
        let mut led = Self {
            pin,
            mode: LedMode::Off,
            pulse_until: None,
            now: 0,
            lit: true,
        };
        led.drive(false);
        led
    }

    /// Advance the driver's notion of time, ending an expired pulse.
    pub fn update(&mut self, now: Tick) {
        self.now = now;
        if self.pulse_until.is_some_and(|end| now >= end) {
            self.pulse_until = None;
            self.apply();
        }
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_until.is_some()
    }

    /// Current pin level as commanded by this driver.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn apply(&mut self) {
        let on = self.pulse_until.is_some() || self.mode == LedMode::On;
        self.drive(on);
    }

    fn drive(&mut self, on: bool) {
        if on == self.lit {
            return;
        }
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        match result {
            Ok(()) => self.lit = on,
            Err(e) => warn!("LED: pin write failed: {:?}", embedded_hal::digital::Error::kind(&e)),
        }
    }
}

impl<P: OutputPin> LedPort for StatusLed<P> {
    fn set_mode(&mut self, mode: LedMode) {
        self.mode = mode;
        self.apply();
    }

    fn pulse(&mut self, duration_ms: u32) {
        self.pulse_until = Some(self.now.saturating_add(u64::from(duration_ms)));
        self.apply();
    }
}

// ── Host pin ──────────────────────────────────────────────────

/// In-memory output pin for host builds and tests.
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
    /// Number of level changes written.
    pub writes: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

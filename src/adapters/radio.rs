//! Logging radio adapter.
//!
//! Implements [`RadioPort`] for builds without the platform radio stack.
//! Every request is logged and kept in a short history so the simulation
//! binary and the integration tests can inspect what would have gone on
//! air. Payload encoding belongs to the real stack and is not modelled.

use heapless::HistoryBuffer;
use log::info;

use crate::app::ports::{RadioChannel, RadioMode, RadioPort};
use crate::error::RadioError;

/// How many recent messages [`LogRadio`] keeps.
const HISTORY_LEN: usize = 32;

/// One request handed to the radio.
#[derive(Debug, Clone, PartialEq)]
pub enum RadioMessage {
    Pairing {
        name: heapless::String<16>,
        version: heapless::String<16>,
    },
    Temperature {
        channel: RadioChannel,
        celsius: f32,
    },
    Co2 {
        ppm: f32,
    },
    Int {
        topic: heapless::String<32>,
        value: i32,
    },
}

pub struct LogRadio {
    mode: Option<RadioMode>,
    history: HistoryBuffer<RadioMessage, HISTORY_LEN>,
    sent: u32,
}

impl Default for LogRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogRadio {
    pub fn new() -> Self {
        Self {
            mode: None,
            history: HistoryBuffer::new(),
            sent: 0,
        }
    }

    pub fn mode(&self) -> Option<RadioMode> {
        self.mode
    }

    /// Total messages accepted since boot (pairing included).
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Retained messages, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &RadioMessage> {
        self.history.oldest_ordered()
    }

    fn accept(&mut self, msg: RadioMessage) -> Result<(), RadioError> {
        if self.mode.is_none() {
            return Err(RadioError::NotInitialised);
        }
        self.history.write(msg);
        self.sent = self.sent.saturating_add(1);
        Ok(())
    }
}

/// Copy `s` into a bounded string, truncating on a char boundary.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl RadioPort for LogRadio {
    fn init(&mut self, mode: RadioMode) {
        info!("RADIO | init mode={:?}", mode);
        self.mode = Some(mode);
    }

    fn pairing_request(&mut self, name: &str, version: &str) -> Result<(), RadioError> {
        self.accept(RadioMessage::Pairing {
            name: bounded(name),
            version: bounded(version),
        })?;
        info!("RADIO | pairing request name={} version={}", name, version);
        Ok(())
    }

    fn pub_temperature(&mut self, channel: RadioChannel, celsius: f32) -> Result<(), RadioError> {
        self.accept(RadioMessage::Temperature { channel, celsius })?;
        info!("RADIO | temperature {:?} {:.2}", channel, celsius);
        Ok(())
    }

    fn pub_co2(&mut self, ppm: f32) -> Result<(), RadioError> {
        self.accept(RadioMessage::Co2 { ppm })?;
        info!("RADIO | co2 {:.0}", ppm);
        Ok(())
    }

    fn pub_int(&mut self, topic: &str, value: i32) -> Result<(), RadioError> {
        self.accept(RadioMessage::Int {
            topic: bounded(topic),
            value,
        })?;
        info!("RADIO | {} {}", topic, value);
        Ok(())
    }
}

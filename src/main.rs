//! Climate node firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SimulatedSensor ×3   LogRadio     StatusLed    LogEventSink │
//! │  (SensorDriver)       (RadioPort)  (LedPort)    (EventSink)  │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            NodeService (pure logic)                    │  │
//! │  │  publish filters · threshold monitor                   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  Scheduler (cooperative, tick-driven) · MonotonicClock       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sensor readings come from slow synthetic waveforms so the filters and
//! the LED can be watched on the console.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::info;

use climate_node::adapters::log_sink::LogEventSink;
use climate_node::adapters::radio::LogRadio;
use climate_node::adapters::time::MonotonicClock;
use climate_node::config::NodeConfig;
use climate_node::drivers::status_led::StatusLed;
use climate_node::error::SensorError;
use climate_node::node::{Node, Peripherals};
use climate_node::scheduler::Tick;
use climate_node::sensors::SimulatedSensor;

/// Period of the synthetic waveforms.
const WAVE_PERIOD_MS: f32 = 20.0 * 60.0 * 1000.0;

/// Environment variable naming a JSON config override (host builds).
#[cfg(not(feature = "espidf"))]
const CONFIG_ENV: &str = "CLIMATE_NODE_CONFIG";

/// Upper bound on one idle sleep, so a stuck plan never hangs the loop.
const MAX_IDLE_MS: u64 = 1000;

fn wave(t: Tick, mid: f32, amplitude: f32) -> f32 {
    let phase = (t as f32 / WAVE_PERIOD_MS) * core::f32::consts::TAU;
    mid + amplitude * phase.sin()
}

fn temperature_c(t: Tick) -> Result<f32, SensorError> {
    Ok(wave(t, 23.0, 3.0))
}

fn co2_ppm(t: Tick) -> Result<f32, SensorError> {
    Ok(wave(t, 800.0, 400.0))
}

fn tvoc_ppb(t: Tick) -> Result<u16, SensorError> {
    Ok(wave(t, 45.0, 25.0).round().max(0.0) as u16)
}

#[cfg(feature = "espidf")]
fn init_logger() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(feature = "espidf"))]
fn init_logger() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    Ok(())
}

#[cfg(not(feature = "espidf"))]
fn load_config() -> Result<NodeConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(NodeConfig::default());
    };
    let json = std::fs::read_to_string(&path)?;
    let config = NodeConfig::from_json(&json)?;
    info!("Config loaded from {}", path);
    Ok(config)
}

#[cfg(feature = "espidf")]
fn load_config() -> Result<NodeConfig> {
    Ok(NodeConfig::default())
}

#[cfg(feature = "espidf")]
fn status_led() -> Result<StatusLed<impl embedded_hal::digital::OutputPin>> {
    use esp_idf_hal::gpio::PinDriver;
    use esp_idf_hal::peripherals::Peripherals as Board;

    let p = Board::take()?;
    Ok(StatusLed::new(PinDriver::output(p.pins.gpio8)?))
}

#[cfg(not(feature = "espidf"))]
fn status_led() -> Result<StatusLed<impl embedded_hal::digital::OutputPin>> {
    Ok(StatusLed::new(climate_node::drivers::status_led::SimPin::new()))
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logger()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Climate node v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    let hw = Peripherals {
        temperature: SimulatedSensor::new(temperature_c),
        co2: SimulatedSensor::new(co2_ppm),
        voc: SimulatedSensor::new(tvoc_ppb),
        radio: LogRadio::new(),
        led: status_led()?,
        sink: LogEventSink::new(),
    };

    // ── 3. Node ───────────────────────────────────────────────
    let mut node = Node::new(load_config()?, hw)?;
    let clock = MonotonicClock::new();
    node.start();

    info!("System ready. Entering scheduler loop.");

    // ── 4. Scheduler loop ─────────────────────────────────────
    loop {
        let now = clock.uptime_ms();
        node.poll(now);

        let idle = node
            .next_wakeup()
            .map_or(MAX_IDLE_MS, |at| at.saturating_sub(now).min(MAX_IDLE_MS));
        std::thread::sleep(Duration::from_millis(idle.max(1)));
    }
}

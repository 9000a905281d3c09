//! Application service — the node's domain core.
//!
//! [`NodeService`] owns the application context, the three sensor observers
//! and the threshold monitor. It exposes one entry point per scheduler
//! callback. All I/O flows through port traits injected at call sites, so
//! the whole service is testable with mock adapters.
//!
//! ```text
//!  SensorDriver ──▶ ┌──────────────────────────┐ ──▶ RadioPort
//!                   │       NodeService         │
//!     WakePort ◀────│  observers · monitor      │ ──▶ LedPort
//!                   └──────────────────────────┘ ──▶ EventSink
//! ```

use log::{info, warn};

use crate::config::NodeConfig;
use crate::error::Result;
use crate::monitor::ThresholdMonitor;
use crate::scheduler::{TaskId, Tick};
use crate::sensors::{Co2Observer, TemperatureObserver, VocObserver};

use super::context::{AppContext, LatestReadings};
use super::events::{AppEvent, Publication};
use super::ports::{
    EventSink, LedMode, LedPort, RadioMode, RadioPort, SensorDriver, SensorEvent, SensorObserver,
    WakePort,
};

/// Firmware version carried by the pairing request.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct NodeService {
    config: NodeConfig,
    ctx: AppContext,
    temperature: TemperatureObserver,
    co2: Co2Observer,
    voc: VocObserver,
    monitor: ThresholdMonitor,
    publications: u32,
}

impl NodeService {
    /// Build the service. `monitor_task` is the scheduler task that runs
    /// [`threshold_tick`](Self::threshold_tick); observers wake it on every
    /// publish.
    pub fn new(config: NodeConfig, monitor_task: TaskId) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            temperature: TemperatureObserver::new(config.temperature, monitor_task),
            co2: Co2Observer::new(config.co2, monitor_task),
            voc: VocObserver::new(config.voc, monitor_task),
            monitor: ThresholdMonitor::new(config.limits),
            ctx: AppContext::new(),
            config,
            publications: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot wiring: LED pulse, radio in sleeping-node role, one pairing
    /// request.
    pub fn start(
        &mut self,
        led: &mut impl LedPort,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        led.pulse(self.config.boot_pulse_ms);

        radio.init(RadioMode::NodeSleeping);
        match radio.pairing_request(&self.config.pairing_name, FIRMWARE_VERSION) {
            Ok(()) => sink.emit(&AppEvent::PairingRequested {
                name: self.config.pairing_name.clone(),
            }),
            Err(e) => warn!("Pairing request not queued: {}", e),
        }

        sink.emit(&AppEvent::Started {
            version: FIRMWARE_VERSION,
        });
        info!("NodeService started (v{})", FIRMWARE_VERSION);
    }

    // ── Sensor callbacks ──────────────────────────────────────

    pub fn on_temperature_event<D: SensorDriver<Value = f32>>(
        &mut self,
        event: SensorEvent,
        driver: &D,
        now: Tick,
        radio: &mut impl RadioPort,
        wake: &mut impl WakePort,
        sink: &mut impl EventSink,
    ) -> Option<Publication> {
        let publication = dispatch(&mut self.temperature, event, driver, now, &mut self.ctx, radio, wake);
        self.record(publication, sink)
    }

    pub fn on_co2_event<D: SensorDriver<Value = f32>>(
        &mut self,
        event: SensorEvent,
        driver: &D,
        now: Tick,
        radio: &mut impl RadioPort,
        wake: &mut impl WakePort,
        sink: &mut impl EventSink,
    ) -> Option<Publication> {
        let publication = dispatch(&mut self.co2, event, driver, now, &mut self.ctx, radio, wake);
        self.record(publication, sink)
    }

    pub fn on_voc_event<D: SensorDriver<Value = u16>>(
        &mut self,
        event: SensorEvent,
        driver: &D,
        now: Tick,
        radio: &mut impl RadioPort,
        wake: &mut impl WakePort,
        sink: &mut impl EventSink,
    ) -> Option<Publication> {
        let publication = dispatch(&mut self.voc, event, driver, now, &mut self.ctx, radio, wake);
        self.record(publication, sink)
    }

    // ── Periodic task ─────────────────────────────────────────

    /// Evaluate the limits and drive the LED. Runs every
    /// `monitor_interval_ms` and whenever a publish wakes it.
    pub fn threshold_tick(&mut self, led: &mut impl LedPort, sink: &mut impl EventSink) -> bool {
        let (exceeded, changed) = self.monitor.evaluate(&self.ctx.latest);
        let mode = LedMode::from(exceeded);
        led.set_mode(mode);
        self.ctx.led_mode = Some(mode);
        if changed {
            sink.emit(&AppEvent::LimitChanged { exceeded });
        }
        exceeded
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn latest(&self) -> &LatestReadings {
        &self.ctx.latest
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Total publications since boot across all channels.
    pub fn publications(&self) -> u32 {
        self.publications
    }

    pub fn temperature(&self) -> &TemperatureObserver {
        &self.temperature
    }

    pub fn co2(&self) -> &Co2Observer {
        &self.co2
    }

    pub fn voc(&self) -> &VocObserver {
        &self.voc
    }

    // ── Internal ──────────────────────────────────────────────

    fn record(
        &mut self,
        publication: Option<Publication>,
        sink: &mut impl EventSink,
    ) -> Option<Publication> {
        let p = publication?;
        self.publications = self.publications.saturating_add(1);
        sink.emit(&AppEvent::Published(p));
        Some(p)
    }
}

/// Route a driver event to the matching observer method.
fn dispatch<D, O, R, W>(
    observer: &mut O,
    event: SensorEvent,
    driver: &D,
    now: Tick,
    ctx: &mut AppContext,
    radio: &mut R,
    wake: &mut W,
) -> Option<Publication>
where
    D: SensorDriver,
    O: SensorObserver<D>,
    R: RadioPort,
    W: WakePort,
{
    match event {
        SensorEvent::Update => observer.on_update(driver, now, ctx, radio, wake),
        SensorEvent::Error => {
            observer.on_error(driver);
            None
        }
    }
}

//! Sensor subsystem: one observer per measured quantity.
//!
//! Each observer owns its channel's publish bookkeeping and reacts to the
//! driver's update/error events. On a publish it transmits the value,
//! stores it in the application context and wakes the threshold task so
//! the LED reflects the reading without waiting for the next period.
//!
//! | Observer              | Driver value | Radio target                     |
//! |-----------------------|--------------|----------------------------------|
//! | [`TemperatureObserver`] | `f32` °C   | channel `R1I2c0AddressAlternate` |
//! | [`Co2Observer`]         | `f32` ppm  | implicit CO2 channel             |
//! | [`VocObserver`]         | `u16` ppb  | topic `voc-lp-sensor/0:0/tvoc`   |

pub mod co2;
pub mod sim;
pub mod temperature;
pub mod voc;

use log::{debug, warn};

use crate::app::context::AppContext;
use crate::app::events::{Publication, SensorKind};
use crate::app::ports::{RadioPort, SensorDriver, WakePort};
use crate::filter::{FilterValue, SensorChannelState};
use crate::scheduler::{TaskId, Tick};

pub use co2::Co2Observer;
pub use sim::SimulatedSensor;
pub use temperature::TemperatureObserver;
pub use voc::VocObserver;

/// Shared update path for every observer.
///
/// A driver with no valid value ends the cycle here with nothing touched.
/// Otherwise the channel decides; on a publish the value goes out on the
/// channel's radio target, lands in the context through `store`, and `monitor_task` is
/// planned now.
#[allow(clippy::too_many_arguments)]
fn publish_if_due<D, R, W>(
    kind: SensorKind,
    channel: &mut SensorChannelState<D::Value>,
    driver: &D,
    now: Tick,
    ctx: &mut AppContext,
    radio: &mut R,
    wake: &mut W,
    monitor_task: TaskId,
    store: impl FnOnce(&mut AppContext, f32),
) -> Option<Publication>
where
    D: SensorDriver,
    D::Value: FilterValue,
    R: RadioPort,
    W: WakePort,
{
    let value = driver.value().ok()?;
    if !channel.offer(value, now) {
        return None;
    }

    let as_f32 = value.as_f32();
    // The radio stack owns retries; the channel still counts as published.
    if let Err(e) = channel.target().send(radio, as_f32) {
        warn!("APP: {:?} publish not queued: {}", kind, e);
    }
    debug!("APP: {:?}: {:.2} {}", kind, as_f32, kind.unit());

    store(ctx, as_f32);
    wake.plan_now(monitor_task);

    Some(Publication {
        sensor: kind,
        value: as_f32,
        tick: now,
    })
}

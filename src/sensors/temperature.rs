//! TMP112 temperature channel.
//!
//! The TMP112 sits on I2C0 at the alternate address (0x49), so its readings
//! go out on `RadioChannel::R1I2c0AddressAlternate`.

use crate::app::context::AppContext;
use crate::app::events::{Publication, SensorKind};
use crate::app::ports::{RadioChannel, RadioPort, RadioTarget, SensorDriver, SensorObserver, WakePort};
use crate::config::PublishPolicy;
use crate::filter::SensorChannelState;
use crate::scheduler::{TaskId, Tick};

/// I2C address of the on-board TMP112.
pub const TMP112_I2C_ADDRESS: u8 = 0x49;

pub struct TemperatureObserver {
    channel: SensorChannelState<f32>,
    monitor_task: TaskId,
}

impl TemperatureObserver {
    pub fn new(policy: PublishPolicy, monitor_task: TaskId) -> Self {
        let target = RadioTarget::Temperature(RadioChannel::R1I2c0AddressAlternate);
        Self {
            channel: SensorChannelState::new(target, policy),
            monitor_task,
        }
    }

    pub fn channel(&self) -> &SensorChannelState<f32> {
        &self.channel
    }
}

impl<D: SensorDriver<Value = f32>> SensorObserver<D> for TemperatureObserver {
    fn on_update<R, W>(
        &mut self,
        driver: &D,
        now: Tick,
        ctx: &mut AppContext,
        radio: &mut R,
        wake: &mut W,
    ) -> Option<Publication>
    where
        R: RadioPort,
        W: WakePort,
    {
        super::publish_if_due(
            SensorKind::Temperature,
            &mut self.channel,
            driver,
            now,
            ctx,
            radio,
            wake,
            self.monitor_task,
            |ctx, v| ctx.latest.temperature = v,
        )
    }
}

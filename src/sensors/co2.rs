//! CO2 module channel. Published on the radio stack's implicit CO2 channel.

use crate::app::context::AppContext;
use crate::app::events::{Publication, SensorKind};
use crate::app::ports::{RadioPort, RadioTarget, SensorDriver, SensorObserver, WakePort};
use crate::config::PublishPolicy;
use crate::filter::SensorChannelState;
use crate::scheduler::{TaskId, Tick};

pub struct Co2Observer {
    channel: SensorChannelState<f32>,
    monitor_task: TaskId,
}

impl Co2Observer {
    pub fn new(policy: PublishPolicy, monitor_task: TaskId) -> Self {
        Self {
            channel: SensorChannelState::new(RadioTarget::Co2, policy),
            monitor_task,
        }
    }

    pub fn channel(&self) -> &SensorChannelState<f32> {
        &self.channel
    }
}

impl<D: SensorDriver<Value = f32>> SensorObserver<D> for Co2Observer {
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
            SensorKind::Co2,
            &mut self.channel,
            driver,
            now,
            ctx,
            radio,
            wake,
            self.monitor_task,
            |ctx, v| ctx.latest.co2_concentration = v,
        )
    }
}

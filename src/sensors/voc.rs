//! VOC channel.
//!
//! The driver reports TVOC as an unsigned ppb count and the value goes out
//! as an integer on a named topic. Deltas are taken on the integer counts,
//! so the 1 ppb threshold publishes on every change of at least one count.

use crate::app::context::AppContext;
use crate::app::events::{Publication, SensorKind};
use crate::app::ports::{RadioPort, RadioTarget, SensorDriver, SensorObserver, WakePort};
use crate::config::{PublishPolicy, VOC_TOPIC};
use crate::filter::SensorChannelState;
use crate::scheduler::{TaskId, Tick};

pub struct VocObserver {
    channel: SensorChannelState<u16>,
    monitor_task: TaskId,
}

impl VocObserver {
    pub fn new(policy: PublishPolicy, monitor_task: TaskId) -> Self {
        Self {
            channel: SensorChannelState::new(RadioTarget::Topic(VOC_TOPIC), policy),
            monitor_task,
        }
    }

    pub fn channel(&self) -> &SensorChannelState<u16> {
        &self.channel
    }
}

impl<D: SensorDriver<Value = u16>> SensorObserver<D> for VocObserver {
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
            SensorKind::Voc,
            &mut self.channel,
            driver,
            now,
            ctx,
            radio,
            wake,
            self.monitor_task,
            |ctx, v| ctx.latest.tvoc = v,
        )
    }
}

//! Change/interval publish filter.
//!
//! Every sensor channel keeps the last value it put on air and a deadline.
//! A new reading is published when it moved far enough from the last
//! published value, or when the channel has been silent past its deadline:
//!
//! ```text
//! publish  ⇔  |v − last| ≥ value_change  ∨  now > next_allowed_publish_tick
//! ```
//!
//! The deadline is only ever moved by a publish, and always to
//! `now + no_change_interval`.

use crate::app::ports::RadioTarget;
use crate::config::PublishPolicy;
use crate::scheduler::Tick;

/// A value the filter can compare against the last published one.
pub trait FilterValue: Copy + Default {
    /// Absolute distance from `last`, in sensor units.
    fn abs_delta(self, last: Self) -> f32;

    /// Value as stored in [`LatestReadings`](crate::app::context::LatestReadings).
    fn as_f32(self) -> f32;
}

impl FilterValue for f32 {
    fn abs_delta(self, last: Self) -> f32 {
        (self - last).abs()
    }

    fn as_f32(self) -> f32 {
        self
    }
}

/// VOC counts are compared as integers, so any change of one count or more
/// clears a 1 ppb threshold.
impl FilterValue for u16 {
    fn abs_delta(self, last: Self) -> f32 {
        (i32::from(self) - i32::from(last)).unsigned_abs() as f32
    }

    fn as_f32(self) -> f32 {
        f32::from(self)
    }
}

/// Per-sensor publish bookkeeping.
#[derive(Debug, Clone)]
pub struct SensorChannelState<V> {
    last_published_value: V,
    next_allowed_publish_tick: Tick,
    target: RadioTarget,
    policy: PublishPolicy,
}

impl<V: FilterValue> SensorChannelState<V> {
    /// Fresh channel: nothing published yet, deadline at tick 0.
    pub fn new(target: RadioTarget, policy: PublishPolicy) -> Self {
        Self {
            last_published_value: V::default(),
            next_allowed_publish_tick: 0,
            target,
            policy,
        }
    }

    /// Whether `value` sampled at `now` should go on air.
    pub fn should_publish(&self, value: V, now: Tick) -> bool {
        value.abs_delta(self.last_published_value) >= self.policy.value_change
            || now > self.next_allowed_publish_tick
    }

    /// Record a publish of `value` at `now` and push the deadline out.
    pub fn commit(&mut self, value: V, now: Tick) {
        self.last_published_value = value;
        self.next_allowed_publish_tick = now.saturating_add(self.policy.no_change_interval_ms);
    }

    /// [`should_publish`](Self::should_publish) followed by
    /// [`commit`](Self::commit) when it fires.
    pub fn offer(&mut self, value: V, now: Tick) -> bool {
        let publish = self.should_publish(value, now);
        if publish {
            self.commit(value, now);
        }
        publish
    }

    pub fn last_published_value(&self) -> V {
        self.last_published_value
    }

    pub fn next_allowed_publish_tick(&self) -> Tick {
        self.next_allowed_publish_tick
    }

    pub fn target(&self) -> RadioTarget {
        self.target
    }
}

//! Node runtime: scheduler, service and peripherals wired together.
//!
//! [`Node`] registers the four periodic tasks, routes each dispatch to the
//! matching [`NodeService`] entry point and keeps the LED driver's clock in
//! step with the scheduler. Time is supplied by the caller, so the same
//! runtime runs against the wall clock in the binary and against simulated
//! ticks in tests.
//!
//! | Task          | First run | Period                      |
//! |---------------|-----------|-----------------------------|
//! | `threshold`   | tick 0    | `monitor_interval_ms`       |
//! | `temperature` | tick 0    | `temperature.update_interval_ms` |
//! | `co2`         | tick 0    | `co2.update_interval_ms`    |
//! | `voc`         | tick 0    | `voc.update_interval_ms`    |

use embedded_hal::digital::OutputPin;
use log::{info, trace};

use crate::app::ports::{EventSink, RadioPort, SensorDriver, TaskHandler};
use crate::app::service::NodeService;
use crate::config::NodeConfig;
use crate::drivers::status_led::StatusLed;
use crate::error::{Error, Result};
use crate::scheduler::{Scheduler, TaskId, Tick};

/// Everything the node talks to.
pub struct Peripherals<T, C, V, R, P, S> {
    pub temperature: T,
    pub co2: C,
    pub voc: V,
    pub radio: R,
    pub led: StatusLed<P>,
    pub sink: S,
}

#[derive(Debug, Clone, Copy)]
struct Tasks {
    monitor: TaskId,
    temperature: TaskId,
    co2: TaskId,
    voc: TaskId,
}

/// Task handler half of the node, split off so the scheduler can lend
/// itself to the running task.
struct Runtime<T, C, V, R, P, S> {
    service: NodeService,
    hw: Peripherals<T, C, V, R, P, S>,
    tasks: Tasks,
}

impl<T, C, V, R, P, S> TaskHandler for Runtime<T, C, V, R, P, S>
where
    T: SensorDriver<Value = f32>,
    C: SensorDriver<Value = f32>,
    V: SensorDriver<Value = u16>,
    R: RadioPort,
    P: OutputPin,
    S: EventSink,
{
    fn run_task(&mut self, task: TaskId, sched: &mut Scheduler) {
        let now = sched.spin_tick();
        self.hw.led.update(now);
        let hw = &mut self.hw;

        let period = if task == self.tasks.monitor {
            self.service.threshold_tick(&mut hw.led, &mut hw.sink);
            self.service.config().monitor_interval_ms
        } else if task == self.tasks.temperature {
            let event = hw.temperature.measure(now);
            self.service
                .on_temperature_event(event, &hw.temperature, now, &mut hw.radio, &mut *sched, &mut hw.sink);
            self.service.config().temperature.update_interval_ms
        } else if task == self.tasks.co2 {
            let event = hw.co2.measure(now);
            self.service
                .on_co2_event(event, &hw.co2, now, &mut hw.radio, &mut *sched, &mut hw.sink);
            self.service.config().co2.update_interval_ms
        } else if task == self.tasks.voc {
            let event = hw.voc.measure(now);
            self.service
                .on_voc_event(event, &hw.voc, now, &mut hw.radio, &mut *sched, &mut hw.sink);
            self.service.config().voc.update_interval_ms
        } else {
            trace!("Node: unknown task {}", task.index());
            return;
        };

        sched.plan_current_relative(period);
    }
}

/// The assembled sensor node.
pub struct Node<T, C, V, R, P, S> {
    sched: Scheduler,
    rt: Runtime<T, C, V, R, P, S>,
}

impl<T, C, V, R, P, S> Node<T, C, V, R, P, S>
where
    T: SensorDriver<Value = f32>,
    C: SensorDriver<Value = f32>,
    V: SensorDriver<Value = u16>,
    R: RadioPort,
    P: OutputPin,
    S: EventSink,
{
    /// Validate `config`, register the tasks and take ownership of the
    /// peripherals. Nothing runs until [`start`](Self::start) or the first
    /// [`poll`](Self::poll).
    pub fn new(config: NodeConfig, hw: Peripherals<T, C, V, R, P, S>) -> Result<Self> {
        let mut sched = Scheduler::new();
        let mut register = |label: &'static str| {
            sched
                .register(label, 0)
                .ok_or(Error::Init("task table full"))
        };
        let tasks = Tasks {
            monitor: register("threshold")?,
            temperature: register("temperature")?,
            co2: register("co2")?,
            voc: register("voc")?,
        };
        let service = NodeService::new(config, tasks.monitor)?;
        info!("Node: {} tasks registered", sched.task_count());
        Ok(Self {
            sched,
            rt: Runtime { service, hw, tasks },
        })
    }

    /// Boot wiring: LED pulse, radio init, pairing request.
    pub fn start(&mut self) {
        let now = self.sched.now();
        let hw = &mut self.rt.hw;
        hw.led.update(now);
        self.rt.service.start(&mut hw.led, &mut hw.radio, &mut hw.sink);
    }

    /// Set the clock to `now` and run every task due. Returns the number of
    /// dispatches.
    pub fn poll(&mut self, now: Tick) -> usize {
        self.sched.advance_to(now);
        self.rt.hw.led.update(self.sched.now());
        self.sched.run_pending(&mut self.rt)
    }

    /// Simulate time up to and including `end`, dispatching every task in
    /// order at its planned tick.
    pub fn run_until(&mut self, end: Tick) -> usize {
        let mut ran = 0;
        while let Some(at) = self.sched.next_wakeup() {
            if at > end {
                break;
            }
            ran += self.poll(at);
        }
        self.sched.advance_to(end);
        self.rt.hw.led.update(self.sched.now());
        ran
    }

    /// Tick of the next planned dispatch.
    pub fn next_wakeup(&self) -> Option<Tick> {
        self.sched.next_wakeup()
    }

    pub fn now(&self) -> Tick {
        self.sched.now()
    }

    pub fn service(&self) -> &NodeService {
        &self.rt.service
    }

    pub fn peripherals(&self) -> &Peripherals<T, C, V, R, P, S> {
        &self.rt.hw
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<T, C, V, R, P, S> {
        &mut self.rt.hw
    }
}

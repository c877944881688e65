//! Frame-driven timers.
//!
//! Periodic and delayed actions are queued here instead of rescheduling
//! themselves. The instance advances the scheduler once per frame, before
//! subsystem updates, using scaled time.

use crate::{
    clock::FrameTime,
    registry::SubsystemRegistry,
    types::{Seconds, TaskId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    Continue,
    Stop,
}

type Task = Box<dyn FnMut(&mut SubsystemRegistry, &FrameTime) -> TaskControl>;

struct ScheduledTask {
    id:       TaskId,
    /// None for one-shot tasks.
    interval: Option<Seconds>,
    timer:    Countdown,
    task:     Task,
}

#[derive(Default)]
pub struct Scheduler {
    next_id: TaskId,
    tasks:   Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay` seconds from now.
    pub fn after<F>(&mut self, delay: Seconds, mut task: F) -> TaskId
    where
        F: FnMut(&mut SubsystemRegistry, &FrameTime) + 'static,
    {
        self.push(None, delay, Box::new(move |registry: &mut SubsystemRegistry, time: &FrameTime| {
            task(registry, time);
            TaskControl::Stop
        }))
    }

    /// Run `task` every `interval` seconds until it returns Stop or is
    /// cancelled. The first run happens one interval from now.
    pub fn every<F>(&mut self, interval: Seconds, task: F) -> TaskId
    where
        F: FnMut(&mut SubsystemRegistry, &FrameTime) -> TaskControl + 'static,
    {
        self.push(Some(interval.max(0.0)), interval, Box::new(task))
    }

    fn push(&mut self, interval: Option<Seconds>, delay: Seconds, task: Task) -> TaskId {
        self.next_id += 1;
        let id = self.next_id;
        self.tasks.push(ScheduledTask {
            id,
            interval,
            timer: Countdown::new(delay),
            task,
        });
        id
    }

    /// Returns true if the task was still queued.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance every timer by `time.delta` and run what came due, in
    /// queue order. A repeating task runs at most once per frame.
    /// Returns the number of tasks that ran.
    pub fn advance(&mut self, time: &FrameTime, registry: &mut SubsystemRegistry) -> usize {
        let mut ran = 0;
        self.tasks.retain_mut(|scheduled| {
            if !scheduled.timer.tick(time.delta) {
                return true;
            }
            ran += 1;
            let control = (scheduled.task)(registry, time);
            match (control, scheduled.interval) {
                (TaskControl::Continue, Some(interval)) => {
                    scheduled.timer = Countdown::new(interval);
                    true
                }
                _ => false,
            }
        });
        if ran > 0 {
            log::debug!("frame={} scheduler: ran {ran} task(s)", time.frame);
        }
        ran
    }
}

/// A countdown from a fixed duration to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration:  Seconds,
    remaining: Seconds,
}

impl Countdown {
    pub fn new(duration: Seconds) -> Self {
        let duration = duration.max(0.0);
        Self { duration, remaining: duration }
    }

    /// Count down by `delta`. Returns true once the countdown has finished.
    pub fn tick(&mut self, delta: Seconds) -> bool {
        self.remaining = (self.remaining - delta.max(0.0)).max(0.0);
        self.is_done()
    }

    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction of the duration already elapsed, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        1.0 - self.remaining / self.duration
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }
}

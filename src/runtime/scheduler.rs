//! Fixed-rate pass scheduler.
//!
//! Host frames feed elapsed time into [`Scheduler::tick`]. A pass is due once
//! the accumulated time reaches the update interval; the accumulator then
//! restarts from zero. Time beyond the interval is discarded, so outputs step
//! at a fixed cadence and never run catch-up passes.

use crate::config::{update_interval, DEFAULT_UPDATES_PER_SECOND};
use crate::error::Result;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Scheduler {
    updates_per_second: f32,
    interval: Duration,
    accumulated: Duration,
}

impl Scheduler {
    /// Create a scheduler running `updates_per_second` passes per second.
    pub fn new(updates_per_second: f32) -> Result<Self> {
        Ok(Self {
            updates_per_second,
            interval: update_interval(updates_per_second)?,
            accumulated: Duration::ZERO,
        })
    }

    /// Advance by `elapsed`. Returns `true` when a pass is due.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Change the update rate. The accumulated time is kept.
    pub fn set_updates_per_second(&mut self, updates_per_second: f32) -> Result<()> {
        self.interval = update_interval(updates_per_second)?;
        self.updates_per_second = updates_per_second;
        Ok(())
    }

    pub fn updates_per_second(&self) -> f32 {
        self.updates_per_second
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Discard accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            interval: Duration::from_secs_f64(1.0 / f64::from(DEFAULT_UPDATES_PER_SECOND)),
            accumulated: Duration::ZERO,
        }
    }
}

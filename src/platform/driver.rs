//! Fixed-step tick scheduling
//!
//! Turns irregular frame callbacks into whole ticks at the game's interval.
//! Never runs a tick itself; it only says how many are due.

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_ms: f64,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
}

impl TickDriver {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator_ms: 0.0,
            last_time_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms as u32
    }

    /// Switch cadence. Any partially elapsed tick is dropped so the old and
    /// new schedules never overlap.
    pub fn set_interval(&mut self, interval_ms: u32) {
        let interval_ms = f64::from(interval_ms.max(1));
        if interval_ms != self.interval_ms {
            self.interval_ms = interval_ms;
            self.accumulator_ms = 0.0;
        }
    }

    /// Forget timing history (after pause, tab switch, new game)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
    }

    /// Feed a frame timestamp; returns how many ticks are due now
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_time_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.elapsed(elapsed)
    }

    /// Feed elapsed time directly; returns how many ticks are due now
    pub fn elapsed(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator_ms += elapsed_ms;
        let mut due = 0;
        while self.accumulator_ms >= self.interval_ms && due < MAX_SUBSTEPS {
            self.accumulator_ms -= self.interval_ms;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            // Too far behind (tab was asleep): drop the backlog
            self.accumulator_ms = self.accumulator_ms.min(self.interval_ms);
        }
        due
    }
}

//! Fixed-timestep tick timer
//!
//! The host feeds real frame deltas; the timer turns them into whole ticks.
//! It only runs while armed, and the session disarms it when the round ends
//! or the host tears down, so no tick can land after that point.

use std::time::Duration;

use crate::consts::{MAX_CATCHUP_TICKS, TICK_MS};

/// Accumulator that yields whole ticks while armed
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    accumulator: Duration,
    max_catchup: u32,
    armed: bool,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS))
    }
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            max_catchup: MAX_CATCHUP_TICKS,
            armed: false,
        }
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.accumulator = Duration::ZERO;
        self.armed = true;
    }

    /// Stop delivering ticks and forget partial progress
    pub fn disarm(&mut self) {
        self.accumulator = Duration::ZERO;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Time until the next tick is due (None while disarmed)
    pub fn until_next(&self) -> Option<Duration> {
        self.armed
            .then(|| self.interval.saturating_sub(self.accumulator))
    }

    /// Feed elapsed time; returns how many ticks are due now
    ///
    /// A long stall (tab hidden, debugger) delivers at most `max_catchup`
    /// ticks and drops the rest.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed || self.interval.is_zero() {
            return 0;
        }
        self.accumulator += dt;

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_catchup {
            self.accumulator -= self.interval;
            due += 1;
        }
        if self.accumulator >= self.interval {
            log::debug!(
                "Tick timer fell behind, dropping {:?}",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }
        due
    }
}

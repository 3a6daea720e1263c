//! Host-facing round session
//!
//! Binds a `RoundEngine` to a time source, a scoped `TickTimer` and the host
//! shell's navigation callbacks. The host calls `update` from its frame loop
//! and forwards taps; the session decides when ticks happen.

use std::time::Duration;

use super::time::TimeSource;
use super::timer::TickTimer;
use crate::engine::RoundEngine;
use crate::sim::{NextAction, RandomSource, RoundPhase, SeededRandom, TapResult};

/// Navigation callbacks into the hosting shell
pub trait RoundHost {
    /// Player chose Continue after a passing round
    fn on_complete(&mut self);
    /// Player left the game
    fn on_back(&mut self);
}

/// Host that ignores navigation (headless runs)
impl RoundHost for () {
    fn on_complete(&mut self) {}
    fn on_back(&mut self) {}
}

/// One game screen: engine + timer + host wiring
pub struct RoundSession<T: TimeSource, R: RandomSource = SeededRandom> {
    engine: RoundEngine<R>,
    timer: TickTimer,
    time: T,
    host: Box<dyn RoundHost>,
    closed: bool,
}

impl<T: TimeSource, R: RandomSource> RoundSession<T, R> {
    pub fn new(engine: RoundEngine<R>, time: T, host: impl RoundHost + 'static) -> Self {
        Self {
            engine,
            timer: TickTimer::default(),
            time,
            host: Box::new(host),
            closed: false,
        }
    }

    pub fn engine(&self) -> &RoundEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RoundEngine<R> {
        &mut self.engine
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start (or restart) the round and arm the tick timer
    ///
    /// Returns false once the session is closed.
    pub fn start(&mut self) -> bool {
        if self.closed {
            log::warn!("Start ignored: session already closed");
            return false;
        }
        self.engine.start();
        self.timer.arm();
        true
    }

    /// Retry after a round; same as `start`
    pub fn retry(&mut self) -> bool {
        self.start()
    }

    /// Feed a frame delta; runs due ticks and returns how many ran
    pub fn update(&mut self, dt: Duration) -> u32 {
        let due = self.timer.advance(dt);
        let mut ran = 0;
        for _ in 0..due {
            if !self.engine.tick() {
                break;
            }
            ran += 1;
            if self.engine.phase() == RoundPhase::Completed {
                // Round over: release the timer
                self.timer.disarm();
                break;
            }
        }
        ran
    }

    /// Forward a tap, stamped with the session's clock
    pub fn tap(&mut self, balloon_id: u32) -> Option<TapResult> {
        if self.closed {
            return None;
        }
        let now = self.time.now_ms();
        self.engine.tap(balloon_id, now)
    }

    /// Actions the outcome screen should offer (empty until completed)
    pub fn available_actions(&self) -> Vec<NextAction> {
        self.engine
            .outcome()
            .map(|o| vec![o.next_action()])
            .unwrap_or_default()
    }

    /// Continue to the host; only honoured after a passing round
    pub fn complete(&mut self) -> bool {
        if self.closed {
            log::debug!("Continue ignored (session closed)");
            return false;
        }
        if !self.engine.outcome().is_some_and(|o| o.passed) {
            log::debug!("Continue ignored (round not passed)");
            return false;
        }
        self.teardown();
        self.host.on_complete();
        true
    }

    /// Leave the game at any time
    pub fn back(&mut self) {
        if self.closed {
            return;
        }
        self.teardown();
        self.host.on_back();
    }

    fn teardown(&mut self) {
        self.timer.disarm();
        self.closed = true;
        log::info!("Round session closed (score {})", self.engine.score());
    }
}

impl<T: TimeSource, R: RandomSource> Drop for RoundSession<T, R> {
    fn drop(&mut self) {
        if self.timer.is_armed() {
            log::debug!("Round session dropped mid-round, cancelling timer");
            self.timer.disarm();
        }
    }
}

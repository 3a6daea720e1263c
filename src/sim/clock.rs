//! Countdown clock and phase machine
//!
//! Idle -> Active via `start_round` (also valid from Active/Completed as a
//! restart), Active -> Completed only when the countdown hits zero.

use super::outcome::classify;
use super::state::{RoundEvent, RoundPhase, RoundState, RoundStats};
use crate::consts::ROUND_SECONDS;

/// Reset every round field and enter Active
pub fn start_round(state: &mut RoundState) {
    if state.phase == RoundPhase::Active {
        log::info!("Restarting active round (score was {})", state.score);
    }
    state.score = 0;
    state.combo = 0;
    state.last_pop_ms = None;
    state.balloons.clear();
    state.time_remaining = ROUND_SECONDS;
    state.time_ticks = 0;
    state.stats = RoundStats::default();
    state.outcome = None;
    state.events.clear();
    state.phase = RoundPhase::Active;
    state.events.push(RoundEvent::Started);
}

/// Decrement the countdown by one second
///
/// Returns true on the tick that completes the round. No-op unless Active.
pub fn advance_clock(state: &mut RoundState) -> bool {
    if state.phase != RoundPhase::Active {
        return false;
    }

    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining > 0 {
        return false;
    }

    let outcome = classify(state.score);
    state.phase = RoundPhase::Completed;
    state.outcome = Some(outcome);
    state.events.push(RoundEvent::Completed(outcome));
    log::info!(
        "Round complete: score={} rating={} passed={}",
        outcome.score,
        outcome.rating.label(),
        outcome.passed
    );
    true
}

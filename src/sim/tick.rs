//! Fixed-interval round tick
//!
//! One tick = one second of round time. Order: drift, drop escaped balloons,
//! spawn, countdown.

use super::clock::advance_clock;
use super::rng::RandomSource;
use super::spawn::maybe_spawn;
use super::state::{RoundEvent, RoundPhase, RoundState};

/// Advance the round by one tick
pub fn tick(state: &mut RoundState, rng: &mut impl RandomSource) {
    // Idle and Completed rounds are frozen
    if state.phase != RoundPhase::Active {
        return;
    }

    state.time_ticks += 1;

    for balloon in &mut state.balloons {
        balloon.drift();
    }

    let mut escaped = Vec::new();
    state.balloons.retain(|b| {
        if b.has_exited() {
            escaped.push(b.id);
            false
        } else {
            true
        }
    });
    for id in escaped {
        log::trace!("Balloon {} escaped", id);
        state.stats.escaped += 1;
        state.events.push(RoundEvent::Escaped { id });
    }

    maybe_spawn(state, rng);

    advance_clock(state);

    log::trace!(
        "Tick {}: {} balloons, {}s left, score {}",
        state.time_ticks,
        state.balloons.len(),
        state.time_remaining,
        state.score
    );
}

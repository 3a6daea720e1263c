//! Tap resolution and combo scoring
//!
//! A combo is a pure time gate: any pop landing within `COMBO_WINDOW_MS` of
//! the previous pop extends it, regardless of balloon kind or position.

use serde::{Deserialize, Serialize};

use super::state::{BalloonKind, RoundEvent, RoundState};
use crate::consts::*;

/// Result of a successful pop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapResult {
    pub balloon_id: u32,
    pub kind: BalloonKind,
    pub base_points: u64,
    pub bonus: u64,
    /// base_points + bonus
    pub points: u64,
    /// Combo level after this pop
    pub combo: u32,
}

/// Pop a balloon at `now_ms`
///
/// Returns None (and changes nothing) if the round isn't active or the
/// balloon is no longer live.
pub fn resolve_tap(state: &mut RoundState, balloon_id: u32, now_ms: u64) -> Option<TapResult> {
    if !state.is_active() {
        return None;
    }
    let idx = state.balloons.iter().position(|b| b.id == balloon_id)?;

    let within_window = state
        .last_pop_ms
        .is_some_and(|last| now_ms.saturating_sub(last) < COMBO_WINDOW_MS);

    // Bonus and pitch use the combo level reached *before* this pop
    let prior_combo = state.combo;
    let bonus = if within_window {
        let bonus = u64::from(state.combo) * COMBO_BONUS_PER_LEVEL;
        state.combo += 1;
        bonus
    } else {
        state.combo = 0;
        0
    };

    let balloon = state.balloons.swap_remove(idx);
    let base_points = balloon.base_points();
    let points = base_points + bonus;

    state.score += points;
    state.last_pop_ms = Some(now_ms);
    state.stats.record_pop(balloon.kind, state.combo);
    state.events.push(RoundEvent::Popped {
        id: balloon_id,
        points,
        combo: state.combo,
        tone_combo: prior_combo,
    });
    log::debug!(
        "Popped {} balloon {}: +{} (bonus {}, combo {})",
        balloon.kind.as_str(),
        balloon_id,
        points,
        bonus,
        state.combo
    );

    Some(TapResult {
        balloon_id,
        kind: balloon.kind,
        base_points,
        bonus,
        points,
        combo: state.combo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::start_round;
    use crate::sim::state::Balloon;

    fn active_with(kinds: &[BalloonKind]) -> (RoundState, Vec<u32>) {
        let mut state = RoundState::new();
        start_round(&mut state);
        let ids = kinds
            .iter()
            .map(|&kind| {
                let id = state.next_balloon_id();
                state.balloons.push(Balloon::new(id, kind, 10.0, 1.0, 0));
                id
            })
            .collect();
        (state, ids)
    }

    #[test]
    fn test_combo_scenario() {
        let (mut state, ids) = active_with(&[
            BalloonKind::Normal,
            BalloonKind::Normal,
            BalloonKind::Bonus,
        ]);

        let a = resolve_tap(&mut state, ids[0], 0).expect("pop a");
        assert_eq!((a.points, a.combo, state.score), (10, 0, 10));

        let b = resolve_tap(&mut state, ids[1], 500).expect("pop b");
        assert_eq!((b.bonus, b.combo, state.score), (0, 1, 20));

        let c = resolve_tap(&mut state, ids[2], 1200).expect("pop c");
        assert_eq!(c.bonus, 5);
        assert_eq!(c.combo, 2);
        assert_eq!(state.score, 20 + 25 + 5);
    }

    #[test]
    fn test_combo_resets_at_window() {
        let (mut state, ids) = active_with(&[BalloonKind::Normal; 3]);
        resolve_tap(&mut state, ids[0], 0);
        resolve_tap(&mut state, ids[1], 999);
        assert_eq!(state.combo, 1);

        let r = resolve_tap(&mut state, ids[2], 999 + COMBO_WINDOW_MS).expect("pop");
        assert_eq!(r.combo, 0);
        assert_eq!(r.bonus, 0);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_first_pop_never_combos() {
        let (mut state, ids) = active_with(&[BalloonKind::Special]);
        // Timestamp zero must not read as "within window of nothing"
        let r = resolve_tap(&mut state, ids[0], 0).expect("pop");
        assert_eq!(r.combo, 0);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_missing_balloon_is_noop() {
        let (mut state, ids) = active_with(&[BalloonKind::Normal]);
        resolve_tap(&mut state, ids[0], 0);
        let before = (state.score, state.combo, state.last_pop_ms, state.balloons.len());

        assert!(resolve_tap(&mut state, ids[0], 100).is_none());
        assert!(resolve_tap(&mut state, 9999, 100).is_none());
        assert_eq!(
            before,
            (state.score, state.combo, state.last_pop_ms, state.balloons.len())
        );
    }

    #[test]
    fn test_tap_ignored_outside_active() {
        let mut state = RoundState::new();
        let id = state.next_balloon_id();
        state
            .balloons
            .push(Balloon::new(id, BalloonKind::Normal, 1.0, 1.0, 0));
        assert!(resolve_tap(&mut state, id, 0).is_none());
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_pop_event_carries_prior_combo() {
        let (mut state, ids) = active_with(&[BalloonKind::Normal; 3]);
        resolve_tap(&mut state, ids[0], 0);
        resolve_tap(&mut state, ids[1], 100);
        resolve_tap(&mut state, ids[2], 5_000);

        let levels: Vec<(u32, u32)> = state
            .events
            .iter()
            .filter_map(|e| match e {
                RoundEvent::Popped {
                    combo, tone_combo, ..
                } => Some((*combo, *tone_combo)),
                _ => None,
            })
            .collect();
        // A reset pop still sounds at the level it broke
        assert_eq!(levels, vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_same_timestamp_taps_resolve_in_order() {
        let (mut state, ids) = active_with(&[BalloonKind::Normal; 2]);
        let first = resolve_tap(&mut state, ids[0], 5000).expect("first");
        let second = resolve_tap(&mut state, ids[1], 5000).expect("second");
        assert_eq!(first.combo, 0);
        assert_eq!(second.combo, 1);
        assert_eq!(second.bonus, 0);
    }

    #[test]
    fn test_backwards_clock_counts_as_rapid() {
        let (mut state, ids) = active_with(&[BalloonKind::Normal; 2]);
        resolve_tap(&mut state, ids[0], 10_000);
        let r = resolve_tap(&mut state, ids[1], 9_000).expect("pop");
        assert_eq!(r.combo, 1);
    }
}

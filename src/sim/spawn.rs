//! Balloon spawning
//!
//! Draw order per tick: spawn decision, then (only if spawning) kind, x,
//! color, speed. Scripted sources rely on this order.

use super::rng::RandomSource;
use super::state::{Balloon, BalloonKind, RoundEvent, RoundState};
use crate::PALETTE;
use crate::consts::*;

/// Build a balloon from four draws (kind, x, color, speed)
pub fn roll_balloon(id: u32, rng: &mut impl RandomSource) -> Balloon {
    let kind = BalloonKind::from_roll(rng.next_unit());
    let x = rng.next_range(0.0, SPAWN_X_MAX);
    let color = PALETTE[rng.next_index(PALETTE.len())];
    let speed = rng.next_range(MIN_SPEED, MAX_SPEED);
    Balloon::new(id, kind, x, speed, color)
}

/// Roll the per-tick spawn chance and add a balloon on success
///
/// Returns the new balloon's id.
pub fn maybe_spawn(state: &mut RoundState, rng: &mut impl RandomSource) -> Option<u32> {
    if rng.next_unit() >= SPAWN_CHANCE {
        return None;
    }

    let id = state.next_balloon_id();
    let balloon = roll_balloon(id, rng);
    log::debug!(
        "Spawned {} balloon {} at x={:.1} speed={:.2}",
        balloon.kind.as_str(),
        id,
        balloon.pos.x,
        balloon.speed
    );
    state.events.push(RoundEvent::Spawned {
        id,
        kind: balloon.kind,
    });
    state.balloons.push(balloon);
    state.stats.spawned += 1;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_spawn_declines_above_chance() {
        let mut state = RoundState::new();
        let mut rng = ScriptedRandom::new([0.3]);
        assert_eq!(maybe_spawn(&mut state, &mut rng), None);
        assert!(state.balloons.is_empty());
        // Declining consumes only the decision draw
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_spawn_uses_scripted_attributes() {
        let mut state = RoundState::new();
        // spawn, kind=special, x=50%, color index 2, speed midpoint
        let mut rng = ScriptedRandom::new([0.0, 0.05, 0.5, 0.3, 0.5]);
        let id = maybe_spawn(&mut state, &mut rng).expect("should spawn");

        let balloon = state.balloon(id).expect("balloon is live");
        assert_eq!(balloon.kind, BalloonKind::Special);
        assert_eq!(balloon.base_points(), 50);
        assert_eq!(balloon.pos.x, 45.0);
        assert_eq!(balloon.pos.y, ENTRY_Y);
        assert_eq!(balloon.color, PALETTE[2]);
        assert_eq!(balloon.speed, 1.25);
        assert_eq!(state.stats.spawned, 1);
        assert_eq!(
            state.events,
            vec![RoundEvent::Spawned {
                id,
                kind: BalloonKind::Special
            }]
        );
    }

    #[test]
    fn test_rolled_attributes_in_bounds() {
        let mut rng = SeededRandom::new(2024);
        for id in 0..500 {
            let balloon = roll_balloon(id, &mut rng);
            assert!((0.0..SPAWN_X_MAX).contains(&balloon.pos.x));
            assert!((MIN_SPEED..MAX_SPEED).contains(&balloon.speed));
            assert!(PALETTE.contains(&balloon.color));
            assert_eq!(balloon.size, balloon.kind.size());
        }
    }

    #[test]
    fn test_spawn_rate_roughly_thirty_percent() {
        let mut state = RoundState::new();
        let mut rng = SeededRandom::new(99);
        let spawned = (0..10_000)
            .filter(|_| maybe_spawn(&mut state, &mut rng).is_some())
            .count();
        assert!((2_700..3_300).contains(&spawned), "spawned {spawned}");
    }
}

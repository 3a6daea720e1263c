use proptest::prelude::*;

use balloon_pop::RoundEngine;
use balloon_pop::audio::SilentSink;
use balloon_pop::consts::{COMBO_BONUS_PER_LEVEL, COMBO_WINDOW_MS, PASS_SCORE, ROUND_SECONDS};
use balloon_pop::sim::{Rating, RoundPhase, classify};

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Tap { pick: usize, gap_ms: u64 },
    TapMissing,
    Restart,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        8 => (any::<usize>(), 0u64..2_500).prop_map(|(pick, gap_ms)| Op::Tap { pick, gap_ms }),
        1 => Just(Op::TapMissing),
        1 => Just(Op::Restart),
    ]
}

proptest! {
    #[test]
    fn round_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 0..300)) {
        let mut engine = RoundEngine::with_seed(seed).with_audio(SilentSink);
        engine.start();
        let mut now = 0u64;

        for op in ops {
            let before = engine.state().clone();
            match op {
                Op::Tick => {
                    let ran = engine.tick();
                    let after = engine.state();
                    if before.phase == RoundPhase::Active {
                        prop_assert!(ran);
                        prop_assert_eq!(after.time_remaining, before.time_remaining - 1);
                        let expected = if after.time_remaining == 0 {
                            RoundPhase::Completed
                        } else {
                            RoundPhase::Active
                        };
                        prop_assert_eq!(after.phase, expected);
                    } else {
                        prop_assert!(!ran);
                        prop_assert_eq!(after.time_remaining, before.time_remaining);
                        prop_assert_eq!(&after.balloons, &before.balloons);
                    }
                    prop_assert_eq!(after.score, before.score);
                }
                Op::Tap { pick, gap_ms } => {
                    if before.balloons.is_empty() {
                        continue;
                    }
                    now += gap_ms;
                    let target = &before.balloons[pick % before.balloons.len()];
                    let result = engine.tap(target.id, now);
                    let after = engine.state();

                    if before.phase != RoundPhase::Active {
                        prop_assert!(result.is_none());
                        prop_assert_eq!(after.score, before.score);
                        continue;
                    }

                    let tap = result.expect("live balloon in active round pops");
                    let rapid = before
                        .last_pop_ms
                        .is_some_and(|last| now - last < COMBO_WINDOW_MS);
                    let (combo, bonus) = if rapid {
                        (before.combo + 1, u64::from(before.combo) * COMBO_BONUS_PER_LEVEL)
                    } else {
                        (0, 0)
                    };
                    prop_assert_eq!(tap.combo, combo);
                    prop_assert_eq!(tap.bonus, bonus);
                    prop_assert_eq!(after.score, before.score + target.base_points() + bonus);
                    prop_assert_eq!(after.balloons.len(), before.balloons.len() - 1);
                    prop_assert!(after.balloon(target.id).is_none());
                }
                Op::TapMissing => {
                    now += 10;
                    prop_assert!(engine.tap(u32::MAX, now).is_none());
                    let after = engine.state();
                    prop_assert_eq!(after.score, before.score);
                    prop_assert_eq!(after.combo, before.combo);
                    prop_assert_eq!(&after.balloons, &before.balloons);
                }
                Op::Restart => {
                    engine.start();
                    let after = engine.state();
                    prop_assert_eq!(after.phase, RoundPhase::Active);
                    prop_assert_eq!(after.score, 0);
                    prop_assert_eq!(after.combo, 0);
                    prop_assert_eq!(after.time_remaining, ROUND_SECONDS);
                    prop_assert!(after.balloons.is_empty());
                    continue;
                }
            }

            let after = engine.state();
            // Score never goes down within a round
            prop_assert!(after.score >= before.score);
            if before.phase == RoundPhase::Completed {
                prop_assert_eq!(after.score, before.score);
            }
            // Every balloon is live, popped, or escaped - never two of those
            let s = &after.stats;
            prop_assert_eq!(s.spawned, s.popped + s.escaped + after.balloons.len() as u32);
        }
    }

    #[test]
    fn classification_matches_table(score in 0u64..2_000) {
        let outcome = classify(score);
        let expected = if score >= 500 {
            Rating::RoyalMaster
        } else if score >= 300 {
            Rating::BalloonChampion
        } else if score >= 200 {
            Rating::GreatPopper
        } else if score >= 100 {
            Rating::GoodJob
        } else {
            Rating::KeepPracticing
        };
        prop_assert_eq!(outcome.rating, expected);
        prop_assert_eq!(outcome.passed, score >= PASS_SCORE);
        prop_assert_eq!(classify(score), outcome);
    }
}

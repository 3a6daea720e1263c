//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Every operation takes `&mut RoundState` and nothing global
//! - Randomness only through an injected `RandomSource`
//! - No rendering, audio, or platform dependencies (side effects are queued
//!   as `RoundEvent`s for the engine to act on)

pub mod clock;
pub mod input;
pub mod outcome;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{advance_clock, start_round};
pub use input::{TapResult, resolve_tap};
pub use outcome::{NextAction, Outcome, Rating, classify};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use spawn::{maybe_spawn, roll_balloon};
pub use state::{Balloon, BalloonKind, RoundEvent, RoundPhase, RoundState, RoundStats};
pub use tick::tick;

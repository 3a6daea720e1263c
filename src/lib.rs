//! Balloon Pop - A timed balloon-popping arcade round
//!
//! Core modules:
//! - `sim`: Round simulation (spawning, drift, tap scoring, countdown, outcome)
//! - `engine`: Owns a round and publishes snapshots to the renderer
//! - `audio`: Fire-and-forget pop tones
//! - `platform`: Time source, scoped tick timer, host session glue
//! - `settings`: User preferences

pub mod audio;
pub mod autoplay;
pub mod engine;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{AudioError, AudioManager, Tone, ToneSink};
pub use engine::{RoundEngine, RoundSnapshot};
pub use platform::{RoundHost, RoundSession, TickTimer, TimeSource};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// These are fixed rules of the round, not user preferences.
pub mod consts {
    /// Length of one simulation tick in milliseconds (1 Hz clock)
    pub const TICK_MS: u64 = 1000;
    /// Maximum ticks delivered per host update (prevents catch-up bursts)
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// Countdown at round start, in seconds (one tick each)
    pub const ROUND_SECONDS: u32 = 30;

    /// Chance that a balloon spawns on a given tick
    pub const SPAWN_CHANCE: f32 = 0.3;
    /// Kind rolls below this are special balloons
    pub const SPECIAL_ROLL: f32 = 0.1;
    /// Kind rolls below this (and not special) are bonus balloons
    pub const BONUS_ROLL: f32 = 0.3;

    /// Field coordinates are percentages; balloons enter above the top edge
    pub const ENTRY_Y: f32 = 110.0;
    /// Balloons at or below this height have left the field
    pub const EXIT_Y: f32 = -10.0;
    /// Spawn x range (keeps the balloon body inside the field)
    pub const SPAWN_X_MAX: f32 = 90.0;
    /// Drift speed range, field-height percent per tick
    pub const MIN_SPEED: f32 = 0.5;
    pub const MAX_SPEED: f32 = 2.0;

    /// Consecutive pops closer together than this build a combo
    pub const COMBO_WINDOW_MS: u64 = 1000;
    /// Bonus points per prior combo level
    pub const COMBO_BONUS_PER_LEVEL: u64 = 5;

    /// Minimum final score that unlocks Continue
    pub const PASS_SCORE: u64 = 200;

    /// Pop tone: base pitch, pitch step per combo level, length, and gain
    pub const POP_BASE_HZ: f32 = 800.0;
    pub const POP_HZ_PER_COMBO: f32 = 100.0;
    pub const POP_DURATION_SECS: f32 = 0.1;
    pub const POP_GAIN: f32 = 0.1;
}

/// Balloon palette (RGB)
pub const PALETTE: [u32; 8] = [
    0xFF6B9D, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0xFFB347, 0x98FB98,
];


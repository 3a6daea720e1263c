//! Round state and core simulation types
//!
//! Everything the renderer needs to draw a round lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the player to start
    #[default]
    Idle,
    /// Countdown running, balloons drifting
    Active,
    /// Clock expired, outcome available
    Completed,
}

/// Balloon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BalloonKind {
    #[default]
    Normal,
    Bonus,
    Special,
}

impl BalloonKind {
    /// Map a uniform draw in [0, 1) to a kind
    pub fn from_roll(roll: f32) -> Self {
        if roll < SPECIAL_ROLL {
            BalloonKind::Special
        } else if roll < BONUS_ROLL {
            BalloonKind::Bonus
        } else {
            BalloonKind::Normal
        }
    }

    /// Points awarded for popping, before combo bonus
    pub fn base_points(&self) -> u64 {
        match self {
            BalloonKind::Normal => 10,
            BalloonKind::Bonus => 25,
            BalloonKind::Special => 50,
        }
    }

    /// Rendered diameter in pixels
    pub fn size(&self) -> f32 {
        match self {
            BalloonKind::Normal => 40.0,
            BalloonKind::Bonus => 50.0,
            BalloonKind::Special => 60.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalloonKind::Normal => "normal",
            BalloonKind::Bonus => "bonus",
            BalloonKind::Special => "special",
        }
    }
}

/// A balloon entity
///
/// Only `pos.y` changes after spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    /// x: percent of field width, y: percent of field height from the bottom
    pub pos: Vec2,
    /// Downward drift per tick (field-height percent)
    pub speed: f32,
    pub size: f32,
    /// RGB palette entry
    pub color: u32,
    pub kind: BalloonKind,
}

impl Balloon {
    pub fn new(id: u32, kind: BalloonKind, x: f32, speed: f32, color: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, ENTRY_Y),
            speed,
            size: kind.size(),
            color,
            kind,
        }
    }

    #[inline]
    pub fn base_points(&self) -> u64 {
        self.kind.base_points()
    }

    /// Advance one tick of drift
    pub fn drift(&mut self) {
        self.pos.y -= self.speed;
    }

    /// True once the balloon has crossed the exit edge
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.pos.y <= EXIT_Y
    }

    /// True while any part of the field shows the balloon's anchor point
    pub fn is_visible(&self) -> bool {
        (0.0..=100.0).contains(&self.pos.y)
    }
}

/// Things that happened during a tick or tap, drained by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    Started,
    Spawned { id: u32, kind: BalloonKind },
    /// Balloon left the field untouched
    Escaped { id: u32 },
    /// `combo` is the level after the pop; `tone_combo` the level it was
    /// popped at, which sets the pop pitch
    Popped {
        id: u32,
        points: u64,
        combo: u32,
        tone_combo: u32,
    },
    Completed(Outcome),
}

/// Per-round counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub spawned: u32,
    pub popped: u32,
    pub escaped: u32,
    pub best_combo: u32,
    pub popped_normal: u32,
    pub popped_bonus: u32,
    pub popped_special: u32,
}

impl RoundStats {
    pub fn record_pop(&mut self, kind: BalloonKind, combo: u32) {
        self.popped += 1;
        self.best_combo = self.best_combo.max(combo);
        match kind {
            BalloonKind::Normal => self.popped_normal += 1,
            BalloonKind::Bonus => self.popped_bonus += 1,
            BalloonKind::Special => self.popped_special += 1,
        }
    }
}

/// Complete round state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub score: u64,
    /// Countdown in seconds
    pub time_remaining: u32,
    pub combo: u32,
    /// Timestamp (ms) of the last successful pop
    pub last_pop_ms: Option<u64>,
    /// Live balloons
    pub balloons: Vec<Balloon>,
    /// Ticks processed this round
    pub time_ticks: u64,
    pub stats: RoundStats,
    /// Set once when the round completes
    pub outcome: Option<Outcome>,
    /// Pending side effects (not part of the round's identity)
    #[serde(skip)]
    pub events: Vec<RoundEvent>,
    /// Next balloon ID
    next_id: u32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    /// Fresh idle round with a full countdown
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            score: 0,
            time_remaining: ROUND_SECONDS,
            combo: 0,
            last_pop_ms: None,
            balloons: Vec::new(),
            time_ticks: 0,
            stats: RoundStats::default(),
            outcome: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new balloon ID (never reused, even across rounds)
    pub fn next_balloon_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn balloon(&self, id: u32) -> Option<&Balloon> {
        self.balloons.iter().find(|b| b.id == id)
    }

    /// Take queued events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }
}

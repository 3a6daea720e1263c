//! Round engine
//!
//! Owns one `RoundState`, the random source and the audio sink. Every
//! mutation goes through `start`, `tick` or `tap`; after each one the engine
//! plays queued pop tones and publishes a `RoundSnapshot` to subscribers.
//! Renderers read snapshots and never touch the state directly.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, Tone, ToneSink};
use crate::settings::Settings;
use crate::sim::{
    self, Balloon, Outcome, RandomSource, RoundEvent, RoundPhase, RoundState, RoundStats,
    SeededRandom, TapResult,
};

/// Read-only view of a round, published after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub score: u64,
    pub time_remaining: u32,
    pub combo: u32,
    pub balloons: Vec<Balloon>,
    pub stats: RoundStats,
    pub outcome: Option<Outcome>,
    /// Events since the previous snapshot (pop animations, escape effects)
    pub events: Vec<RoundEvent>,
}

impl RoundSnapshot {
    pub fn capture(state: &RoundState, events: Vec<RoundEvent>) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            time_remaining: state.time_remaining,
            combo: state.combo,
            balloons: state.balloons.clone(),
            stats: state.stats.clone(),
            outcome: state.outcome,
            events,
        }
    }
}

type Listener = Box<dyn FnMut(&RoundSnapshot)>;

/// Drives one round at a time
pub struct RoundEngine<R: RandomSource = SeededRandom> {
    state: RoundState,
    rng: R,
    audio: Box<dyn ToneSink>,
    listeners: Vec<Listener>,
}

impl RoundEngine<SeededRandom> {
    /// Engine with a reproducible spawn sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SeededRandom::new(seed))
    }

    /// Engine configured from user settings (seed + audio levels)
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_settings(settings, AudioManager::from_settings(settings))
    }

    /// Seed from settings, but play tones through a caller-owned sink
    pub fn with_settings(settings: &Settings, sink: impl ToneSink + 'static) -> Self {
        let rng = match settings.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        log::info!("Round engine seeded with {}", rng.seed());
        Self::new(rng).with_audio(sink)
    }
}

impl<R: RandomSource> RoundEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: RoundState::new(),
            rng,
            audio: Box::new(AudioManager::new()),
            listeners: Vec::new(),
        }
    }

    /// Replace the audio sink
    pub fn with_audio(mut self, sink: impl ToneSink + 'static) -> Self {
        self.audio = Box::new(sink);
        self
    }

    /// Register a snapshot listener
    pub fn subscribe(&mut self, listener: impl FnMut(&RoundSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Start (or restart) a round
    pub fn start(&mut self) {
        sim::start_round(&mut self.state);
        log::info!("Round started ({}s)", self.state.time_remaining);
        self.flush();
    }

    /// Advance one tick; returns false if the round wasn't active
    pub fn tick(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        sim::tick(&mut self.state, &mut self.rng);
        self.flush();
        true
    }

    /// Pop a balloon; stray or late taps return None
    pub fn tap(&mut self, balloon_id: u32, now_ms: u64) -> Option<TapResult> {
        let result = sim::resolve_tap(&mut self.state, balloon_id, now_ms);
        if result.is_some() {
            self.flush();
        } else {
            log::trace!("Ignored tap on balloon {}", balloon_id);
        }
        result
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// Current view without pending events
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::capture(&self.state, Vec::new())
    }

    /// Act on queued events and notify listeners
    fn flush(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            if let RoundEvent::Popped { tone_combo, .. } = event {
                // Audio is advisory; a failed tone never touches the round
                if let Err(e) = self.audio.play(Tone::pop(*tone_combo)) {
                    log::debug!("Pop tone skipped: {}", e);
                }
            }
        }

        if self.listeners.is_empty() {
            return;
        }
        let snapshot = RoundSnapshot::capture(&self.state, events);
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

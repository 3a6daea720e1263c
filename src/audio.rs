//! Audio system
//!
//! Pops request a short procedural sine blip. Audio is advisory: a sink may
//! fail, and the engine logs and moves on. On wasm32 tones go through the Web
//! Audio API; native builds have no output device and report `Unavailable`.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::consts::*;
use crate::settings::Settings;

/// Why a tone couldn't be played
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output available")]
    Unavailable,
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// A single sine tone request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    /// Peak gain before user volume is applied
    pub gain: f32,
}

impl Tone {
    /// Pop sound: pitch climbs with the combo level
    pub fn pop(combo: u32) -> Self {
        Self {
            frequency_hz: POP_BASE_HZ + combo as f32 * POP_HZ_PER_COMBO,
            duration_secs: POP_DURATION_SECS,
            gain: POP_GAIN,
        }
    }
}

/// Anything that can emit a tone
pub trait ToneSink {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self, tone: Tone, vol: f32) -> Result<(), AudioError> {
        let Some(ctx) = &self.ctx else {
            return Err(AudioError::Unavailable);
        };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (osc, gain) = create_osc(ctx, tone.frequency_hz, OscillatorType::Sine)
            .ok_or_else(|| AudioError::Backend("failed to build oscillator".into()))?;
        let t = ctx.current_time();
        let duration = f64::from(tone.duration_secs);
        let peak = tone.gain * vol;

        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time((peak * 0.1).max(0.0001), t + duration)
            .ok();

        osc.start()
            .map_err(|e| AudioError::Backend(format!("{e:?}")))?;
        osc.stop_with_when(t + duration).ok();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self, tone: Tone, vol: f32) -> Result<(), AudioError> {
        log::trace!(
            "Tone {:.0} Hz for {:.2}s at gain {:.3} (no native output)",
            tone.frequency_hz,
            tone.duration_secs,
            tone.gain * vol
        );
        Err(AudioError::Unavailable)
    }
}

impl ToneSink for AudioManager {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Ok(());
        }
        self.emit(tone, vol)
    }
}

/// Shared handle: the engine plays through it while the host adjusts volume
impl ToneSink for Rc<RefCell<AudioManager>> {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        self.borrow_mut().play(tone)
    }
}

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Sink that keeps every tone it receives (handy for hosts and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    tones: Rc<RefCell<Vec<Tone>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the tones played so far
    pub fn tones(&self) -> Vec<Tone> {
        self.tones.borrow().clone()
    }
}

impl ToneSink for RecordingSink {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        self.tones.borrow_mut().push(tone);
        Ok(())
    }
}

/// Sink that always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play(&mut self, _tone: Tone) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_tone_pitch() {
        assert_eq!(Tone::pop(0).frequency_hz, 800.0);
        assert_eq!(Tone::pop(3).frequency_hz, 1100.0);
        assert_eq!(Tone::pop(0).duration_secs, 0.1);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        // Muted output is a silent success, not an error
        assert_eq!(audio.play(Tone::pop(0)), Ok(()));
    }

    #[test]
    fn test_settings_applied() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert_eq!(audio.effective_volume(), 0.25);
    }

    #[test]
    fn test_shared_manager_sees_setting_changes() {
        let shared = Rc::new(RefCell::new(AudioManager::new()));
        let mut sink = shared.clone();

        let muted = Settings {
            muted: true,
            ..Settings::default()
        };
        shared.borrow_mut().apply_settings(&muted);
        assert_eq!(sink.play(Tone::pop(0)), Ok(()));

        shared.borrow_mut().apply_settings(&Settings::default());
        assert_eq!(shared.borrow().effective_volume(), 0.8);
        #[cfg(not(target_arch = "wasm32"))]
        assert_eq!(sink.play(Tone::pop(0)), Err(AudioError::Unavailable));
    }

    #[test]
    fn test_recording_sink_shares_log() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.play(Tone::pop(1)).expect("recording never fails");
        assert_eq!(sink.tones(), vec![Tone::pop(1)]);
    }
}

//! Browser bindings for the hosting shell
//!
//! The page owns the frame loop (`requestAnimationFrame`) and rendering; it
//! forwards frame deltas and taps here and redraws from snapshot JSON.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::engine::{RoundEngine, RoundSnapshot};
use crate::platform::{RoundHost, RoundSession, WallTime};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Logger may already be installed on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Balloon Pop (web) loaded");
}

/// Navigation callbacks supplied by the page
struct JsHost {
    on_complete: Option<js_sys::Function>,
    on_back: Option<js_sys::Function>,
}

fn call_host(callback: &Option<js_sys::Function>, what: &str) {
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("Host {} callback failed: {:?}", what, e);
        }
    }
}

impl RoundHost for JsHost {
    fn on_complete(&mut self) {
        call_host(&self.on_complete, "complete");
    }

    fn on_back(&mut self) {
        call_host(&self.on_back, "back");
    }
}

/// One balloon round, driven from JavaScript
#[wasm_bindgen]
pub struct WebRound {
    session: RoundSession<WallTime>,
    settings: Settings,
    audio: Rc<RefCell<AudioManager>>,
}

#[wasm_bindgen]
impl WebRound {
    #[wasm_bindgen(constructor)]
    pub fn new(on_complete: Option<js_sys::Function>, on_back: Option<js_sys::Function>) -> WebRound {
        let settings = Settings::load();
        let audio = Rc::new(RefCell::new(AudioManager::from_settings(&settings)));
        let engine = RoundEngine::with_settings(&settings, audio.clone());
        let host = JsHost {
            on_complete,
            on_back,
        };
        WebRound {
            session: RoundSession::new(engine, WallTime::new(), host),
            settings,
            audio,
        }
    }

    /// Call `callback(json)` with every published snapshot
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        self.session
            .engine_mut()
            .subscribe(move |snapshot: &RoundSnapshot| match serde_json::to_string(snapshot) {
                Ok(json) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("Snapshot listener failed: {:?}", e);
                    }
                }
                Err(e) => log::warn!("Failed to encode snapshot: {}", e),
            });
    }

    /// Start from a click handler so the AudioContext may resume; false once closed
    pub fn start(&mut self) -> bool {
        self.audio.borrow().resume();
        self.session.start()
    }

    pub fn retry(&mut self) -> bool {
        self.audio.borrow().resume();
        self.session.retry()
    }

    #[wasm_bindgen(js_name = setMasterVolume)]
    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume;
        self.store_settings();
    }

    #[wasm_bindgen(js_name = setSfxVolume)]
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.settings.sfx_volume = volume;
        self.store_settings();
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.store_settings();
    }

    /// Feed the frame delta in ms; returns ticks run
    pub fn update(&mut self, dt_ms: f64) -> u32 {
        let dt = Duration::from_secs_f64(dt_ms.max(0.0) / 1000.0);
        self.session.update(dt)
    }

    /// Pop a balloon; returns points awarded (0 if the tap was ignored)
    pub fn tap(&mut self, balloon_id: u32) -> u32 {
        self.session
            .tap(balloon_id)
            .map(|r| u32::try_from(r.points).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    /// Continue to the next screen; false unless the round passed
    pub fn complete(&mut self) -> bool {
        self.session.complete()
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.engine().snapshot()).unwrap_or_default()
    }
}

impl WebRound {
    /// Apply changed preferences to the live audio and persist them
    fn store_settings(&mut self) {
        self.settings.sanitize();
        self.audio.borrow_mut().apply_settings(&self.settings);
        self.settings.save();
    }
}

//! Player settings and preferences
//!
//! Round rules are fixed (see `consts`); only presentation preferences live
//! here. Stored as JSON: a file on native, LocalStorage on the web.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Why settings couldn't be loaded or saved
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence pop tones
    pub muted: bool,

    // === Rounds ===
    /// Fixed spawn seed for reproducible rounds (None = fresh entropy each run)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "balloon_pop_settings";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp volumes into range
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

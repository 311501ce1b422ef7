use crate::playback::{normalize_volume, PlaybackConfig, DEFAULT_VOLUME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "nesa.ambient_settings";

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "ambient_settings.json";

/// Error type for the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    #[cfg(target_arch = "wasm32")]
    #[error("local storage: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings format: {0}")]
    Format(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("no configuration directory on this platform")]
    NoConfigDir,
}

fn default_autoplay() -> bool {
    true
}

/// Listener preferences kept between visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientSettings {
    pub volume: f64,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            autoplay: default_autoplay(),
        }
    }
}

impl AmbientSettings {
    /// Repair values written by older builds or edited by hand.
    pub fn normalized(mut self) -> Self {
        self.volume = normalize_volume(self.volume, DEFAULT_VOLUME);
        self
    }

    /// Playback options for the session, starting from `base`.
    pub fn apply_to(&self, base: PlaybackConfig) -> PlaybackConfig {
        PlaybackConfig {
            autoplay: self.autoplay,
            initial_volume: self.volume,
            ..base
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> AmbientSettings {
    match LocalStorage::get::<AmbientSettings>(SETTINGS_KEY) {
        Ok(settings) => settings.normalized(),
        Err(_) => AmbientSettings::default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &AmbientSettings) -> Result<(), SettingsError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> AmbientSettings {
    let loaded = settings_path().and_then(|path| {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str::<AmbientSettings>(&json)?)
    });

    match loaded {
        Ok(settings) => settings.normalized(),
        Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            AmbientSettings::default()
        }
        Err(err) => {
            tracing::warn!(%err, "falling back to default ambient settings");
            AmbientSettings::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &AmbientSettings) -> Result<(), SettingsError> {
    let path = settings_path()?;
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<std::path::PathBuf, SettingsError> {
    let dir = dirs::config_dir()
        .ok_or(SettingsError::NoConfigDir)?
        .join("nesa-console");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_settings_are_normalized() {
        let settings: AmbientSettings = serde_json::from_str(r#"{"volume": 80.0}"#).unwrap();
        assert!(settings.autoplay);
        assert_eq!(settings.normalized().volume, 1.0);

        let broken = AmbientSettings {
            volume: f64::NAN,
            autoplay: false,
        };
        assert_eq!(broken.normalized().volume, DEFAULT_VOLUME);
    }

    #[test]
    fn settings_override_playback_options() {
        let settings = AmbientSettings {
            volume: 0.6,
            autoplay: false,
        };
        let config = settings.apply_to(PlaybackConfig::default());
        assert!(!config.autoplay);
        assert_eq!(config.initial_volume, 0.6);
        assert_eq!(config.tracks.len(), 4);
    }
}

use serde::{Deserialize, Serialize};

use super::{PlaybackError, TrackList};

pub const DEFAULT_VOLUME: f64 = 0.3;
pub const DEFAULT_LOAD_TIMEOUT_MS: u32 = 15_000;

pub fn default_tracks() -> Vec<String> {
    (1..=4).map(|i| format!("/play/music{i}.mp3")).collect()
}

fn default_autoplay() -> bool {
    true
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

fn default_load_timeout_ms() -> u32 {
    DEFAULT_LOAD_TIMEOUT_MS
}

/// Construction options for a playback controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Attempt playback as soon as the first track is ready.
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    #[serde(default = "default_volume")]
    pub initial_volume: f64,
    /// How long a track may stay in `Loading` before it is skipped.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u32,
    #[serde(default = "default_tracks")]
    pub tracks: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            initial_volume: default_volume(),
            load_timeout_ms: default_load_timeout_ms(),
            tracks: default_tracks(),
        }
    }
}

impl PlaybackConfig {
    pub fn track_list(&self) -> Result<TrackList, PlaybackError> {
        TrackList::new(self.tracks.clone())
    }

    /// Initial volume clamped into `[0, 1]`.
    pub fn effective_volume(&self) -> f64 {
        normalize_volume(self.initial_volume, DEFAULT_VOLUME)
    }
}

/// Clamp `value` to `[0, 1]`, falling back to `fallback` for NaN/infinite input.
pub fn normalize_volume(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"autoplay": false}"#).unwrap();
        assert!(!config.autoplay);
        assert_eq!(config.initial_volume, DEFAULT_VOLUME);
        assert_eq!(config.load_timeout_ms, DEFAULT_LOAD_TIMEOUT_MS);
        assert_eq!(config.tracks.len(), 4);
        assert_eq!(config.tracks[0], "/play/music1.mp3");
    }

    #[test]
    fn volume_is_normalized() {
        assert_eq!(normalize_volume(1.7, 0.3), 1.0);
        assert_eq!(normalize_volume(-0.5, 0.3), 0.0);
        assert_eq!(normalize_volume(f64::NAN, 0.3), 0.3);
        assert_eq!(normalize_volume(f64::INFINITY, 0.3), 0.3);

        let config = PlaybackConfig {
            initial_volume: 4.0,
            ..PlaybackConfig::default()
        };
        assert_eq!(config.effective_volume(), 1.0);
    }

    #[test]
    fn empty_track_config_is_rejected() {
        let config = PlaybackConfig {
            tracks: vec![],
            ..PlaybackConfig::default()
        };
        assert_eq!(config.track_list(), Err(PlaybackError::EmptyTrackList));
    }
}

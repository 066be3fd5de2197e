//! Game settings and tuning
//!
//! Stored as JSON in the platform config directory. Every field has a
//! default, so a partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Physics and pacing values fed to the simulation each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration on the player (pixels/s²)
    pub gravity: f32,
    /// Upward speed set by a flap (pixels/s)
    pub jump_speed: f32,
    /// Leftward obstacle speed (pixels/s)
    pub scroll_speed: f32,
    /// Height of the opening in each obstacle pair
    pub pair_gap: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY * GRAVITY_SCALE,
            jump_speed: JUMP_SPEED,
            scroll_speed: SCROLL_SPEED,
            pair_gap: PAIR_GAP,
            spawn_interval: SPAWN_INTERVAL,
        }
    }
}

impl Tuning {
    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            gravity: pick(self.gravity, defaults.gravity),
            jump_speed: pick(self.jump_speed, defaults.jump_speed),
            scroll_speed: pick(self.scroll_speed, defaults.scroll_speed),
            // The opening has to fit on screen with room to place its center
            pair_gap: if self.pair_gap.is_finite()
                && self.pair_gap > 0.0
                && self.pair_gap * PAIR_MARGIN_FACTOR * 2.0 < HEIGHT
            {
                self.pair_gap
            } else {
                defaults.pair_gap
            },
            spawn_interval: pick(self.spawn_interval, defaults.spawn_interval),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a random one is drawn per process when absent
    pub seed: Option<u64>,
    /// Scoreboard file; the platform data directory is used when absent
    pub scoreboard_path: Option<PathBuf>,
    /// Whether the UI should play sound cues for game events
    pub sound: bool,
    pub tuning: Tuning,
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    /// Default location: `<config_dir>/flappy-drake/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(Self::FILE_NAME))
    }

    /// Read settings from `path`
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Load from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                log::info!("No config directory, using default settings");
                return Self::default();
            }
        };

        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_matches_constants() {
        let tuning = Tuning::default();
        assert!((tuning.gravity - 4905.0).abs() < 1e-2);
        assert_eq!(tuning.jump_speed, 1000.0);
        assert_eq!(tuning.scroll_speed, 500.0);
        assert_eq!(tuning.pair_gap, 200.0);
        assert_eq!(tuning.spawn_interval, 1.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "seed": 42, "tuning": { "scroll_speed": 250.0 } }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tuning.scroll_speed, 250.0);
        assert_eq!(settings.tuning.jump_speed, JUMP_SPEED);
        assert_eq!(settings.scoreboard_path, None);
    }

    #[test]
    fn test_bad_values_are_sanitized() {
        let tuning = Tuning {
            gravity: f32::NAN,
            pair_gap: HEIGHT,
            spawn_interval: 0.0,
            ..Tuning::default()
        }
        .sanitized();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(Settings::load(Some(path.as_path())), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            seed: Some(7),
            sound: true,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load(Some(path.as_path())), settings);
    }
}

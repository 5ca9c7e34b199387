//! Runtime settings
//!
//! Persisted as JSON next to the profiles. Missing fields take defaults so
//! older files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::SHARED_LIVES;
use crate::profiles::StoreError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Round seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Lives the team starts with
    pub shared_lives: u8,
    /// Where profiles and currency are stored
    pub profile_path: PathBuf,
    /// Stop a headless run after this many ticks
    pub max_ticks: u64,
    /// Let the autopilot drive both players
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            shared_lives: SHARED_LIVES,
            profile_path: PathBuf::from("maze_chase_profiles.json"),
            max_ticks: 60 * 60 * 5,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Lives to start with (never zero)
    pub fn effective_lives(&self) -> u8 {
        self.shared_lives.max(1)
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Failed to save settings: {}", e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.shared_lives, 5);
        assert!(settings.autopilot);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 42, "shared_lives": 0 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.effective_seed(), 42);
        assert_eq!(settings.effective_lives(), 1);
        assert_eq!(settings.max_ticks, Settings::default().max_ticks);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("maze-chase-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(9),
            autopilot: false,
            ..Default::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let path = std::env::temp_dir().join(format!("maze-chase-settings-bad-{}.json", std::process::id()));
        fs::write(&path, "{ seed: ").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }
}

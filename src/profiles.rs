//! Player profiles and the shared currency bank
//!
//! Persisted as JSON. The simulation never touches this; the shell reads
//! names before a round and credits currency once when a finished round is left.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PLAYER_COUNT;

/// Failure to read or write a JSON store file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One player's saved profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
}

/// Saved profiles plus the bank both players spend from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profiles {
    pub players: Vec<PlayerProfile>,
    /// Shared currency balance
    #[serde(default)]
    pub currency: u64,
}

impl Profiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for a player slot, defaulting to "Player N"
    pub fn name(&self, index: usize) -> String {
        self.players
            .get(index)
            .map(|p| p.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Player {}", index + 1))
    }

    /// Rename a player slot, growing the list if needed
    pub fn set_name(&mut self, index: usize, name: &str) {
        if self.players.len() <= index {
            self.players.resize_with(index + 1, PlayerProfile::default);
        }
        self.players[index].name = name.trim().to_string();
    }

    /// Names for every player in a round
    pub fn round_names(&self) -> [String; PLAYER_COUNT] {
        std::array::from_fn(|i| self.name(i))
    }

    /// Deposit currency earned by a round
    pub fn credit(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Read profiles from a JSON file
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write profiles to a JSON file, creating parent directories
    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load profiles, starting fresh if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(profiles) => {
                log::info!(
                    "Loaded {} profiles ({} coins)",
                    profiles.players.len(),
                    profiles.currency
                );
                profiles
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profiles found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to load profiles from {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save profiles, logging instead of failing
    pub fn save(&self, path: &Path) {
        match self.write(path) {
            Ok(()) => log::info!("Profiles saved ({} coins)", self.currency),
            Err(e) => log::warn!("Failed to save profiles to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "maze-chase-profiles-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn test_default_names() {
        let profiles = Profiles::new();
        assert_eq!(profiles.name(0), "Player 1");
        assert_eq!(profiles.name(1), "Player 2");
    }

    #[test]
    fn test_set_name_and_blank_fallback() {
        let mut profiles = Profiles::new();
        profiles.set_name(1, "  Nova ");
        assert_eq!(profiles.name(0), "Player 1");
        assert_eq!(profiles.name(1), "Nova");
        profiles.set_name(1, "   ");
        assert_eq!(profiles.name(1), "Player 2");
        assert_eq!(profiles.round_names(), ["Player 1", "Player 2"]);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut profiles = Profiles::new();
        profiles.credit(12);
        profiles.credit(3);
        assert_eq!(profiles.currency, 15);
        profiles.credit(u64::MAX);
        assert_eq!(profiles.currency, u64::MAX);
    }

    #[test]
    fn test_write_then_read() {
        let path = temp_path("rw");
        let mut profiles = Profiles::new();
        profiles.set_name(0, "Ada");
        profiles.credit(7);
        profiles.write(&path).unwrap();

        let loaded = Profiles::read(&path).unwrap();
        assert_eq!(loaded.name(0), "Ada");
        assert_eq!(loaded.currency, 7);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_loads_fresh() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert!(matches!(Profiles::read(&path), Err(StoreError::Io(_))));
        let profiles = Profiles::load(&path);
        assert_eq!(profiles.currency, 0);
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Profiles::read(&path), Err(StoreError::Json(_))));
        assert_eq!(Profiles::load(&path).currency, 0);
        let _ = fs::remove_file(&path);
    }
}

//! File-backed config store.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Settings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Loads and saves the settings document under a flowstate directory
/// (by default `~/.flowstate`).
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at `~/.flowstate`, creating the directory if needed.
    pub fn open_default() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Self::open(home.join(".flowstate"))
    }

    /// Store rooted at an explicit directory (tests use a temp dir).
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The flowstate directory this store (and its sibling state files)
    /// lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    /// Path of the local SQLite database next to the config file.
    pub fn db_path(&self) -> PathBuf {
        self.dir.join("local.db")
    }

    /// Load settings, falling back to defaults when the file is absent or
    /// unparseable. Corruption is recovered, never surfaced.
    pub fn load(&self) -> Settings {
        let path = self.config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("config file corrupted, using defaults: {}", e);
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    /// Persist the whole settings document.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(settings)?;
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }
}

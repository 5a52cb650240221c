//! Application configuration
//!
//! This module re-exports shared types from lair-types and provides
//! persistence and path resolution for AppConfig.

use std::path::PathBuf;

pub use lair_types::{AppConfig, MessagesConfig};

use super::ConfigError;

const APP_NAME: &str = "lair";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_data_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and file layout
pub trait AppConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    /// Resolved data directory, created on demand
    fn data_dir(&self) -> Result<PathBuf, ConfigError>;
    fn boss_types_path(&self) -> Result<PathBuf, ConfigError>;
    fn spawners_path(&self) -> Result<PathBuf, ConfigError>;
    fn kill_log_path(&self) -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = if self.data_directory.is_empty() {
            default_data_directory()
        } else {
            PathBuf::from(&self.data_directory)
        };

        std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    fn boss_types_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(&self.boss_types_file))
    }

    fn spawners_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(&self.spawners_file))
    }

    fn kill_log_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(&self.kill_log_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_configured_data_directory() {
        let dir = std::env::temp_dir().join(format!("lair-config-{}", std::process::id()));
        let config = AppConfig {
            data_directory: dir.to_string_lossy().into_owned(),
            ..AppConfig::default()
        };

        assert_eq!(config.spawners_path().expect("path"), dir.join("spawners.toml"));
        assert_eq!(config.boss_types_path().expect("path"), dir.join("boss_types.toml"));
        assert_eq!(config.kill_log_path().expect("path"), dir.join("kills.jsonl"));
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(&dir);
    }
}

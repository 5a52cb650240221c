//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

use crate::world::LocationParseError;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize TOML")]
    SerializeToml(#[from] toml::ser::Error),

    #[error("boss type '{id}' is defined more than once")]
    DuplicateBossType { id: String },

    #[error("unknown boss type '{id}'")]
    UnknownBossType { id: String },

    #[error("invalid location '{value}'")]
    InvalidLocation {
        value: String,
        #[source]
        source: LocationParseError,
    },
}

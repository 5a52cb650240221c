//! Error types for kill record storage

use std::path::PathBuf;
use thiserror::Error;

/// Errors while handing off or persisting kill records
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("kill record queue is closed")]
    QueueClosed,

    #[error("failed to open kill log {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write kill log {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read kill log {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid kill record on line {line} of {path}")]
    ParseRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize kill record")]
    Serialize(#[from] serde_json::Error),
}

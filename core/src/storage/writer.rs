//! Kill record hand-off and JSON lines store.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{KillRecord, StorageError};

/// Destination for finished kill records. Called on the heartbeat thread,
/// so implementations must return without blocking on I/O.
pub trait KillSink: Send {
    fn submit(&self, record: KillRecord) -> Result<(), StorageError>;
}

/// Blocking persistence backend, driven from a worker thread
pub trait KillStore: Send + 'static {
    fn insert(&mut self, record: &KillRecord) -> Result<(), StorageError>;
}

/// Sending half of the kill record channel
#[derive(Debug, Clone)]
pub struct KillQueue {
    tx: mpsc::UnboundedSender<KillRecord>,
}

impl KillQueue {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<KillRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl KillSink for KillQueue {
    fn submit(&self, record: KillRecord) -> Result<(), StorageError> {
        self.tx.send(record).map_err(|_| StorageError::QueueClosed)
    }
}

/// Drain the queue into `store` on a blocking worker.
///
/// The worker exits once every `KillQueue` clone has been dropped and hands
/// the store back. Insert failures are logged and the record is skipped.
pub fn spawn_kill_writer<S: KillStore>(
    mut rx: mpsc::UnboundedReceiver<KillRecord>,
    mut store: S,
) -> JoinHandle<S> {
    tokio::task::spawn_blocking(move || {
        while let Some(record) = rx.blocking_recv() {
            match store.insert(&record) {
                Ok(()) => tracing::debug!(boss_id = %record.boss_id, "Kill record stored"),
                Err(e) => tracing::warn!(boss_id = %record.boss_id, error = %e, "Failed to store kill record"),
            }
        }
        store
    })
}

/// Appends one JSON object per line
#[derive(Debug)]
pub struct JsonlKillStore {
    path: PathBuf,
    file: File,
}

impl JsonlKillStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StorageError::OpenFile {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record in the file. A missing file is empty.
    pub fn load_all(path: &Path) -> Result<Vec<KillRecord>, StorageError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| StorageError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StorageError::ParseRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl KillStore for JsonlKillStore {
    fn insert(&mut self, record: &KillRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|source| StorageError::WriteFile {
                path: self.path.clone(),
                source,
            })
    }
}

//! In-memory labels, ledger, chat and observers

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::{HashMap, HashSet};

use crate::signals::{BossSignal, SignalHandler};
use crate::storage::{KillRecord, KillSink, KillStore, StorageError};
use crate::world::{Announcer, HologramDisplay, HologramHandle, Ledger, LedgerError, Location};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─────────────────────────────────────────────────────────────────────────────
// Holograms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub location: Location,
    pub lines: Vec<String>,
}

#[derive(Debug, Default)]
struct HologramState {
    next_id: u64,
    labels: HashMap<HologramHandle, Label>,
    created: usize,
    deleted: usize,
    /// Total `set_line` calls, to tell in-place updates from recreation
    writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SandboxHolograms {
    state: Arc<Mutex<HologramState>>,
}

impl SandboxHolograms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self, handle: HologramHandle) -> Option<Label> {
        lock(&self.state).labels.get(&handle).cloned()
    }

    pub fn live_count(&self) -> usize {
        lock(&self.state).labels.len()
    }

    pub fn created_count(&self) -> usize {
        lock(&self.state).created
    }

    pub fn deleted_count(&self) -> usize {
        lock(&self.state).deleted
    }

    pub fn write_count(&self) -> usize {
        lock(&self.state).writes
    }
}

impl HologramDisplay for SandboxHolograms {
    fn create(&mut self, location: &Location) -> HologramHandle {
        let mut state = lock(&self.state);
        state.next_id += 1;
        state.created += 1;
        let handle = HologramHandle(state.next_id);
        state.labels.insert(
            handle,
            Label {
                location: location.clone(),
                lines: Vec::new(),
            },
        );
        handle
    }

    fn set_line(&mut self, handle: HologramHandle, index: usize, text: &str) {
        let mut state = lock(&self.state);
        state.writes += 1;
        let Some(label) = state.labels.get_mut(&handle) else {
            return;
        };
        if label.lines.len() <= index {
            label.lines.resize(index + 1, String::new());
        }
        label.lines[index] = text.to_string();
    }

    fn delete(&mut self, handle: HologramHandle) {
        let mut state = lock(&self.state);
        if state.labels.remove(&handle).is_some() {
            state.deleted += 1;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ledger
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<String, f64>,
    deposits: Vec<(String, f64)>,
    /// Players whose deposits fail
    frozen: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SandboxLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl SandboxLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, player: &str) -> f64 {
        lock(&self.state).balances.get(player).copied().unwrap_or(0.0)
    }

    /// Accepted deposits in order
    pub fn deposits(&self) -> Vec<(String, f64)> {
        lock(&self.state).deposits.clone()
    }

    /// Make every later deposit to `player` fail
    pub fn freeze(&self, player: &str) {
        lock(&self.state).frozen.insert(player.to_string());
    }
}

impl Ledger for SandboxLedger {
    fn deposit(&mut self, player: &str, amount: f64) -> Result<(), LedgerError> {
        let mut state = lock(&self.state);
        if state.frozen.contains(player) {
            return Err(LedgerError::Rejected {
                player: player.to_string(),
                amount,
                reason: "account frozen".to_string(),
            });
        }
        *state.balances.entry(player.to_string()).or_insert(0.0) += amount;
        state.deposits.push((player.to_string(), amount));
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Announcer
// ─────────────────────────────────────────────────────────────────────────────

/// Records broadcasts and echoes them to the log
#[derive(Debug, Clone, Default)]
pub struct SandboxAnnouncer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl SandboxAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    /// Remove and return everything broadcast so far
    pub fn take_lines(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.lines))
    }
}

impl Announcer for SandboxAnnouncer {
    fn broadcast(&mut self, text: &str) {
        tracing::info!(target: "lair::chat", "{text}");
        lock(&self.lines).push(text.to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signals and Kill Records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    signals: Arc<Mutex<Vec<BossSignal>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<BossSignal> {
        lock(&self.signals).clone()
    }
}

impl SignalHandler for RecordingHandler {
    fn handle_signal(&mut self, signal: &BossSignal) {
        lock(&self.signals).push(signal.clone());
    }
}

/// Keeps kill records in memory. Works both as a direct sink and as the
/// backing store of a writer task.
#[derive(Debug, Clone, Default)]
pub struct MemoryKills {
    records: Arc<Mutex<Vec<KillRecord>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemoryKills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<KillRecord> {
        lock(&self.records).clone()
    }

    /// Reject every later submit as if the queue had shut down
    pub fn close(&self) {
        *lock(&self.closed) = true;
    }
}

impl KillSink for MemoryKills {
    fn submit(&self, record: KillRecord) -> Result<(), StorageError> {
        if *lock(&self.closed) {
            return Err(StorageError::QueueClosed);
        }
        lock(&self.records).push(record);
        Ok(())
    }
}

impl KillStore for MemoryKills {
    fn insert(&mut self, record: &KillRecord) -> Result<(), StorageError> {
        lock(&self.records).push(record.clone());
        Ok(())
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lair_core::boss::{BossTypeCatalog, load_boss_types, parse_boss_types};
use lair_core::context::{AppConfig, AppConfigExt, BackgroundTasks};
use lair_core::sandbox::Sandbox;
use lair_core::signals::TracingSignalHandler;
use lair_core::spawner::{SpawnerManager, load_spawner_file, save_spawner_file};
use lair_core::storage::{JsonlKillStore, KillQueue, spawn_kill_writer};
use lair_types::SpawnerFile;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::demo;

/// Handle to the background kill record writer. Resolves once every
/// `KillQueue` sender has been dropped.
pub type KillWriter = JoinHandle<JsonlKillStore>;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the core types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// Single mutator of boss state, shared by the REPL and the heartbeat
    pub manager: Arc<Mutex<SpawnerManager>>,
    /// Inspection handles into the simulated world
    pub sandbox: Sandbox,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
    spawners_path: PathBuf,
    kill_log_path: PathBuf,
}

impl CliContext {
    /// Load boss types and spawners, start the kill writer and build the
    /// manager. Missing data files are seeded with the built-in demo content.
    pub fn init(config: AppConfig) -> Result<(Self, KillWriter), String> {
        let boss_types_path = config.boss_types_path().map_err(|e| e.to_string())?;
        let spawners_path = config.spawners_path().map_err(|e| e.to_string())?;
        let kill_log_path = config.kill_log_path().map_err(|e| e.to_string())?;

        let catalog = load_or_seed_catalog(&boss_types_path)?;
        let records = load_or_seed_spawners(&spawners_path)?;

        let store = JsonlKillStore::open(&kill_log_path).map_err(|e| e.to_string())?;
        let (queue, rx) = KillQueue::channel();
        let writer = spawn_kill_writer(rx, store);

        let sandbox = Sandbox::new();
        let mut services = sandbox
            .services_with_sink(Box::new(queue))
            .with_messages(config.messages.clone());
        if let Some(seed) = config.rng_seed {
            services = services.with_seed(seed);
        }
        services.add_handler(Box::new(TracingSignalHandler));

        let manager = SpawnerManager::from_records(&records, catalog, services)
            .map_err(|e| e.to_string())?;

        let ctx = Self {
            config: Arc::new(RwLock::new(config)),
            manager: Arc::new(Mutex::new(manager)),
            sandbox,
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
            spawners_path,
            kill_log_path,
        };
        Ok((ctx, writer))
    }

    pub fn kill_log_path(&self) -> &Path {
        &self.kill_log_path
    }

    /// Write every spawner record to the spawner file
    pub async fn save_spawners(&self) -> Result<usize, String> {
        let records = self.manager.lock().await.records();
        let count = records.len();
        save_spawner_file(&self.spawners_path, &SpawnerFile { spawners: records })
            .map_err(|e| e.to_string())?;
        Ok(count)
    }

    /// Stop the heartbeat, despawn everything and persist spawner state
    pub async fn shutdown(&self) -> Result<(), String> {
        self.tasks.lock().await.abort_all().await;
        self.manager.lock().await.shutdown(crate::now_ms());
        self.save_spawners().await?;
        Ok(())
    }
}

fn load_or_seed_catalog(path: &Path) -> Result<BossTypeCatalog, String> {
    if path.exists() {
        return load_boss_types(path).map_err(|e| e.to_string());
    }

    tracing::info!(path = %path.display(), "No boss types found, writing demo types");
    std::fs::write(path, demo::DEMO_BOSS_TYPES)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    parse_boss_types(demo::DEMO_BOSS_TYPES, path).map_err(|e| e.to_string())
}

fn load_or_seed_spawners(path: &Path) -> Result<Vec<lair_types::SpawnerRecord>, String> {
    if path.exists() {
        let file = load_spawner_file(path).map_err(|e| e.to_string())?;
        return Ok(file.spawners);
    }

    tracing::info!(path = %path.display(), "No spawners found, registering demo spawners");
    let file = SpawnerFile {
        spawners: demo::demo_spawners(),
    };
    save_spawner_file(path, &file).map_err(|e| e.to_string())?;
    Ok(file.spawners)
}

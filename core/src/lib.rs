pub mod boss;
pub mod context;
pub mod sandbox;
pub mod serde_defaults;
pub mod signals;
pub mod spawner;
pub mod storage;
pub mod world;

// Re-exports for convenience
pub use boss::{
    Ability, AbilityKind, Boss, BossType, BossTypeCatalog, DamageShare, DamageTracker,
    DeathReport, Payout, Ravager, RewardItem, StatProfile, load_boss_types, parse_boss_types,
};
pub use context::{AppConfig, AppConfigExt, BackgroundTasks, ConfigError, MessagesConfig, Services};
pub use signals::{BossSignal, SignalHandler, TracingSignalHandler};
pub use spawner::{
    AliveBoss, BossRegistry, Spawner, SpawnerError, SpawnerManager, format_remaining,
    load_spawner_file, save_spawner_file,
};
pub use storage::{
    JsonlKillStore, KillQueue, KillRecord, KillSink, KillStore, LeaderboardEntry, StorageError,
    spawn_kill_writer,
};
pub use world::{
    Announcer, Buff, BuffKind, EntityId, HologramDisplay, HologramHandle, ItemStack, Ledger,
    LedgerError, Location, LocationParseError, Vec3, World,
};

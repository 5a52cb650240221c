//! Boss type loading
//!
//! Boss types live in a single TOML file of `[[boss_type]]` entries. They are
//! indexed by id into a `BossTypeCatalog` and shared with every spawner and
//! boss through `Arc`.

use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap;

use super::{BossType, BossTypeFile};
use crate::context::ConfigError;

/// Loaded boss types keyed by id
#[derive(Debug, Clone, Default)]
pub struct BossTypeCatalog {
    types: HashMap<String, Arc<BossType>>,
}

impl BossTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type, rejecting duplicate ids
    pub fn insert(&mut self, boss_type: BossType) -> Result<Arc<BossType>, ConfigError> {
        if self.types.contains_key(&boss_type.id) {
            return Err(ConfigError::DuplicateBossType { id: boss_type.id });
        }
        let boss_type = Arc::new(boss_type);
        self.types.insert(boss_type.id.clone(), Arc::clone(&boss_type));
        Ok(boss_type)
    }

    pub fn get(&self, id: &str) -> Option<Arc<BossType>> {
        self.types.get(id).cloned()
    }

    /// Like `get`, but an unknown id is a configuration error
    pub fn require(&self, id: &str) -> Result<Arc<BossType>, ConfigError> {
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownBossType { id: id.to_string() })
    }

    /// Sorted ids, for listings
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Parse boss types from TOML text. `path` is only used for error context.
pub fn parse_boss_types(content: &str, path: &Path) -> Result<BossTypeCatalog, ConfigError> {
    let file: BossTypeFile = toml::from_str(content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    let mut catalog = BossTypeCatalog::new();
    for boss_type in file.boss_types {
        catalog.insert(boss_type)?;
    }
    Ok(catalog)
}

/// Load boss types from a TOML file
pub fn load_boss_types(path: &Path) -> Result<BossTypeCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_boss_types(&content, path)?;
    tracing::info!(path = %path.display(), count = catalog.len(), "Loaded boss types");
    Ok(catalog)
}

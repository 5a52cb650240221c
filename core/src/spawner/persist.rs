//! Spawner persistence
//!
//! Spawners are stored as `[[spawner]]` entries in one TOML file. The whole
//! file is rewritten on save.

use std::path::Path;

use lair_types::SpawnerFile;

use crate::context::ConfigError;

/// Load the spawner file. A missing file yields no spawners.
pub fn load_spawner_file(path: &Path) -> Result<SpawnerFile, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No spawner file, starting empty");
            return Ok(SpawnerFile::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_spawner_file(path: &Path, file: &SpawnerFile) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(file)?;
    std::fs::write(path, content).map_err(|source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), spawners = file.spawners.len(), "Spawner file saved");
    Ok(())
}

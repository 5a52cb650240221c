//! Error types for spawner registry operations

use thiserror::Error;

use crate::context::ConfigError;

#[derive(Debug, Error)]
pub enum SpawnerError {
    #[error("spawner '{id}' is already registered")]
    DuplicateId { id: String },

    #[error("no spawner with id '{id}'")]
    UnknownSpawner { id: String },

    #[error("boss type '{id}' is a minion type and cannot occupy a spawner slot")]
    ChildTypeInSlot { id: String },

    #[error("boss type '{id}' is not a minion type")]
    NotChildType { id: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

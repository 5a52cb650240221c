//! Error types for collaborator boundaries

use thiserror::Error;

/// Errors parsing a persisted `world,x,y,z` location string
#[derive(Debug, Error)]
pub enum LocationParseError {
    #[error("expected 4 comma separated fields, found {found}")]
    WrongArity { found: usize },

    #[error("location has no world name")]
    MissingWorld,

    #[error("invalid {field} coordinate '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors reported by a currency ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("deposit of {amount} to {player} rejected: {reason}")]
    Rejected {
        player: String,
        amount: f64,
        reason: String,
    },

    #[error("ledger unavailable")]
    Unavailable,
}

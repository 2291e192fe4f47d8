use thiserror::Error;

/// Caller defects: bad identifiers or indices handed to the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown game mode: {0}")]
    UnknownMode(String),
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Unknown play mode: {0}")]
    UnknownPlayMode(String),
    #[error("Unknown power-up: {0}")]
    UnknownPowerUp(String),
    #[error("Cell index {0} is outside the board")]
    CellOutOfRange(usize),
}

/// Storage failures. Never fatal, callers degrade to defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Storage is unavailable")]
    Unavailable,
    #[error("Failed to read key {0}")]
    Read(String),
    #[error("Failed to write key {0}")]
    Write(String),
    #[error("Stored value for {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

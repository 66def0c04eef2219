//! Error types for Skirmish

use thiserror::Error;

/// The main error type for Skirmish operations
#[derive(Debug, Error)]
pub enum SkirmishError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Animation error: {0}")]
    AnimationError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Spawn error: {0}")]
    SpawnError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Skirmish operations
pub type Result<T> = std::result::Result<T, SkirmishError>;

impl From<toml::de::Error> for SkirmishError {
    fn from(err: toml::de::Error) -> Self {
        SkirmishError::TomlParseError(err.to_string())
    }
}

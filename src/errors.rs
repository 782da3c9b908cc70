//! Unified error and result types for the Repldex backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid id format: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON decode error: {0}")]
    Bson(#[from] mongodb::bson::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown interaction type: {0}")]
    UnknownInteractionType(u8),

    #[error("No custom id for component")]
    MissingCustomId,

    #[error("Command not found: {0}")]
    CommandNotFound(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

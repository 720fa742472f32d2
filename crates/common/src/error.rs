//! Error type shared across the workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Explorer error: {0}")]
    Explorer(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

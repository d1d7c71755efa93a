//! Error types for the AutoStop core.

use std::path::PathBuf;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Settings-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open settings store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Ride-fixture errors.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;

use bitop_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when composing bitsets
#[derive(Debug, Error)]
pub enum BitopError {
    /// Failure reported by the store, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file could not be read
    #[error("Failed to read config file: {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed
    #[error("Failed to parse YAML config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Namespace must not be empty")]
    InvalidNamespace,
}

/// A specialized Result type for bitset operations
pub type Result<T> = std::result::Result<T, BitopError>;

use crate::BitOp;
use thiserror::Error;

/// Errors reported by a bitmap store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Bit offset outside of the addressable range of the store
    #[error("bit offset {offset} is out of range (max {max})")]
    InvalidOffset { offset: u64, max: u64 },

    /// Wrong number of source keys for a bitwise operation
    #[error("BITOP {op} expects {expected} source key(s), got {actual}")]
    Arity {
        op: BitOp,
        expected: usize,
        actual: usize,
    },

    /// Failure of the underlying transport or backend
    #[error("store backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an arbitrary backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StoreError::Backend(err.into())
    }
}

/// A specialized Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

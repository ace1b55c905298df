//! Bitmap store contract consumed by the bitset algebra.
//!
//! This crate provides:
//! - The [`BitStore`] trait: the five primitives a key-value bitmap store
//!   must expose (get-bit, set-bit, count, compose, delete), plus batched
//!   variants with per-offset default implementations.
//! - [`MemoryStore`]: an in-process store with byte-granular bitmaps and
//!   MSB-first bit addressing.
//!
//! # Examples
//!
//! ```
//! use bitop_store::{BitOp, BitStore, MemoryStore};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let store = MemoryStore::new();
//! store.set_bit("day1", 3, true)?;
//! store.set_bit("day2", 3, true)?;
//! store.bit_op(BitOp::And, "both", &["day1", "day2"])?;
//!
//! assert!(store.get_bit("both", 3)?);
//! assert_eq!(store.bit_count("both")?, 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

pub mod error;
pub use error::{Result, StoreError};

pub mod memory;
pub use memory::MemoryStore;

/// Whole-key bitwise operation understood by [`BitStore::bit_op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOp {
    And,
    Or,
    Xor,
    Not,
}

impl BitOp {
    /// The operation name as it appears on the wire and in derived keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            BitOp::And => "AND",
            BitOp::Or => "OR",
            BitOp::Xor => "XOR",
            BitOp::Not => "NOT",
        }
    }

    /// Number of source keys the operation accepts, if fixed.
    pub fn arity(&self) -> Option<usize> {
        match self {
            BitOp::Not => Some(1),
            BitOp::And | BitOp::Or | BitOp::Xor => None,
        }
    }
}

impl fmt::Display for BitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitives of a key-value store holding one bitmap per key.
///
/// Every call is a blocking request/response. Implementations must not retry
/// on their own; failures surface to the caller as [`StoreError`].
pub trait BitStore: Send + Sync {
    /// Read the bit at `offset`. Missing keys and unset offsets read as `false`.
    fn get_bit(&self, key: &str, offset: u64) -> Result<bool>;

    /// Write the bit at `offset`, creating the key if absent.
    ///
    /// Returns the previous value of the bit.
    fn set_bit(&self, key: &str, offset: u64, value: bool) -> Result<bool>;

    /// Number of bits set to 1 under `key`.
    fn bit_count(&self, key: &str) -> Result<u64>;

    /// Apply `op` over `sources` and store the result under `dest`.
    ///
    /// [`BitOp::Not`] takes exactly one source key. Returns the length of
    /// the resulting value in bytes.
    fn bit_op(&self, op: BitOp, dest: &str, sources: &[&str]) -> Result<u64>;

    /// Remove `key`. Returns the number of keys removed.
    fn delete(&self, key: &str) -> Result<u64>;

    /// Read several bits of one key. Results are aligned with `offsets`.
    fn get_bits(&self, key: &str, offsets: &[u64]) -> Result<Vec<bool>> {
        offsets
            .iter()
            .map(|&offset| self.get_bit(key, offset))
            .collect()
    }

    /// Write `value` at every offset in `offsets`, in order.
    fn set_bits(&self, key: &str, offsets: &[u64], value: bool) -> Result<()> {
        for &offset in offsets {
            self.set_bit(key, offset, value)?;
        }
        Ok(())
    }
}

impl<T: BitStore + ?Sized> BitStore for Arc<T> {
    fn get_bit(&self, key: &str, offset: u64) -> Result<bool> {
        (**self).get_bit(key, offset)
    }

    fn set_bit(&self, key: &str, offset: u64, value: bool) -> Result<bool> {
        (**self).set_bit(key, offset, value)
    }

    fn bit_count(&self, key: &str) -> Result<u64> {
        (**self).bit_count(key)
    }

    fn bit_op(&self, op: BitOp, dest: &str, sources: &[&str]) -> Result<u64> {
        (**self).bit_op(op, dest, sources)
    }

    fn delete(&self, key: &str) -> Result<u64> {
        (**self).delete(key)
    }

    fn get_bits(&self, key: &str, offsets: &[u64]) -> Result<Vec<bool>> {
        (**self).get_bits(key, offsets)
    }

    fn set_bits(&self, key: &str, offsets: &[u64], value: bool) -> Result<()> {
        (**self).set_bits(key, offsets, value)
    }
}

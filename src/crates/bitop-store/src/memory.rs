//! In-process bitmap store.
//!
//! Values behave like byte strings: setting bit `n` grows the value to
//! `n / 8 + 1` bytes, and bit 0 is the most significant bit of the first
//! byte. Composition pads shorter sources with zero bytes, so the result is
//! as long as the longest source and `NOT` flips every trailing bit of the
//! last byte as well.

use bitvec::prelude::*;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{BitOp, BitStore, Result, StoreError};

/// Largest addressable bit offset (values are capped at 512 MiB).
pub const MAX_OFFSET: u64 = (1 << 32) - 1;

type Bits = BitVec<u8, Msb0>;

/// A thread-safe, in-memory [`BitStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, Bits>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Returns `true` if `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Offsets of all set bits under `key`, ascending.
    pub fn ones(&self, key: &str) -> Vec<u64> {
        self.values
            .read()
            .get(key)
            .map(|bits| bits.iter_ones().map(|idx| idx as u64).collect())
            .unwrap_or_default()
    }

    /// Length of the value under `key` in bytes (0 if absent).
    pub fn byte_len(&self, key: &str) -> usize {
        self.values
            .read()
            .get(key)
            .map_or(0, |bits| bits.as_raw_slice().len())
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

fn bit_index(offset: u64) -> Result<usize> {
    if offset > MAX_OFFSET {
        return Err(StoreError::InvalidOffset {
            offset,
            max: MAX_OFFSET,
        });
    }

    usize::try_from(offset).map_err(|_| StoreError::InvalidOffset {
        offset,
        max: MAX_OFFSET,
    })
}

fn read_bit(values: &FxHashMap<String, Bits>, key: &str, idx: usize) -> bool {
    values
        .get(key)
        .and_then(|bits| bits.get(idx).map(|bit| *bit))
        .unwrap_or(false)
}

fn write_bit(values: &mut FxHashMap<String, Bits>, key: &str, idx: usize, value: bool) -> bool {
    let bits = values.entry(key.to_string()).or_default();

    // grow to the byte containing `idx`
    let needed = (idx / 8 + 1) * 8;
    if bits.len() < needed {
        bits.resize(needed, false);
    }

    bits.replace(idx, value)
}

fn compose(op: BitOp, sources: &[&[u8]]) -> Vec<u8> {
    let len = sources.iter().map(|s| s.len()).max().unwrap_or(0);
    let byte_at = |source: &[u8], i: usize| source.get(i).copied().unwrap_or(0);

    (0..len)
        .map(|i| {
            let mut bytes = sources.iter().map(|source| byte_at(source, i));
            let first = bytes.next().unwrap_or(0);
            match op {
                BitOp::And => bytes.fold(first, |acc, b| acc & b),
                BitOp::Or => bytes.fold(first, |acc, b| acc | b),
                BitOp::Xor => bytes.fold(first, |acc, b| acc ^ b),
                BitOp::Not => !first,
            }
        })
        .collect()
}

impl BitStore for MemoryStore {
    fn get_bit(&self, key: &str, offset: u64) -> Result<bool> {
        let idx = bit_index(offset)?;
        Ok(read_bit(&self.values.read(), key, idx))
    }

    fn set_bit(&self, key: &str, offset: u64, value: bool) -> Result<bool> {
        let idx = bit_index(offset)?;
        Ok(write_bit(&mut self.values.write(), key, idx, value))
    }

    fn bit_count(&self, key: &str) -> Result<u64> {
        Ok(self
            .values
            .read()
            .get(key)
            .map_or(0, |bits| bits.count_ones() as u64))
    }

    fn bit_op(&self, op: BitOp, dest: &str, sources: &[&str]) -> Result<u64> {
        let expected = op.arity().unwrap_or(1);
        let arity_ok = match op.arity() {
            Some(n) => sources.len() == n,
            None => !sources.is_empty(),
        };
        if !arity_ok {
            return Err(StoreError::Arity {
                op,
                expected,
                actual: sources.len(),
            });
        }

        let mut values = self.values.write();

        let result = {
            let raw: Vec<&[u8]> = sources
                .iter()
                .map(|key| values.get(*key).map_or(&[][..], |bits| bits.as_raw_slice()))
                .collect();
            compose(op, &raw)
        };

        let len = result.len() as u64;
        trace!("BITOP {} {} <- {:?} ({} bytes)", op, dest, sources, len);

        // an empty result removes the destination
        if result.is_empty() {
            values.remove(dest);
        } else {
            values.insert(dest.to_string(), Bits::from_vec(result));
        }

        Ok(len)
    }

    fn delete(&self, key: &str) -> Result<u64> {
        Ok(u64::from(self.values.write().remove(key).is_some()))
    }

    fn get_bits(&self, key: &str, offsets: &[u64]) -> Result<Vec<bool>> {
        let indices = offsets
            .iter()
            .map(|&offset| bit_index(offset))
            .collect::<Result<Vec<_>>>()?;

        let values = self.values.read();
        Ok(indices
            .into_iter()
            .map(|idx| read_bit(&values, key, idx))
            .collect())
    }

    fn set_bits(&self, key: &str, offsets: &[u64], value: bool) -> Result<()> {
        let indices = offsets
            .iter()
            .map(|&offset| bit_index(offset))
            .collect::<Result<Vec<_>>>()?;

        let mut values = self.values.write();
        for idx in indices {
            write_bit(&mut values, key, idx, value);
        }
        Ok(())
    }
}

//! Operand shapes accepted by the binary operators.
//!
//! A binary operator either composes two store keys or filters a literal id
//! list against a bitset. The two shapes are kept apart in [`Operand`], and
//! only the conversions defined here produce one; anything else is rejected
//! at compile time instead of being coerced into a default.

use crate::bitset::{Bitset, BitsetData, Derived};

/// An ordered list of candidate ids.
///
/// Converts from a single id or from any sequence of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ids(Vec<u64>);

impl Ids {
    pub fn new(ids: Vec<u64>) -> Self {
        Self(ids)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u64> for Ids {
    fn from(id: u64) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<u64>> for Ids {
    fn from(ids: Vec<u64>) -> Self {
        Self(ids)
    }
}

impl From<&Vec<u64>> for Ids {
    fn from(ids: &Vec<u64>) -> Self {
        Self(ids.clone())
    }
}

impl From<&[u64]> for Ids {
    fn from(ids: &[u64]) -> Self {
        Self(ids.to_vec())
    }
}

impl<const N: usize> From<[u64; N]> for Ids {
    fn from(ids: [u64; N]) -> Self {
        Self(ids.to_vec())
    }
}

impl FromIterator<u64> for Ids {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[u64]> for Ids {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

/// Right-hand side of `intersect` and `difference`.
#[derive(Debug)]
pub enum Operand<'a, S> {
    /// Another store-backed bitset, composed key against key
    Bitset(&'a Bitset<S>),
    /// A literal list of candidate ids, filtered bit by bit
    Ids(Ids),
}

impl<'a, S> From<&'a Bitset<S>> for Operand<'a, S> {
    fn from(bitset: &'a Bitset<S>) -> Self {
        Operand::Bitset(bitset)
    }
}

// Filter results take part as bitsets; pass `ids()` to reuse their list.
impl<'a, S> From<&'a BitsetData<S>> for Operand<'a, S> {
    fn from(data: &'a BitsetData<S>) -> Self {
        Operand::Bitset(data.as_bitset())
    }
}

impl<'a, S> From<&'a Derived<S>> for Operand<'a, S> {
    fn from(derived: &'a Derived<S>) -> Self {
        Operand::Bitset(derived.as_bitset())
    }
}

impl<S> From<Ids> for Operand<'_, S> {
    fn from(ids: Ids) -> Self {
        Operand::Ids(ids)
    }
}

impl<S> From<u64> for Operand<'_, S> {
    fn from(id: u64) -> Self {
        Operand::Ids(id.into())
    }
}

impl<S> From<Vec<u64>> for Operand<'_, S> {
    fn from(ids: Vec<u64>) -> Self {
        Operand::Ids(ids.into())
    }
}

impl<S> From<&[u64]> for Operand<'_, S> {
    fn from(ids: &[u64]) -> Self {
        Operand::Ids(ids.into())
    }
}

impl<S, const N: usize> From<[u64; N]> for Operand<'_, S> {
    fn from(ids: [u64; N]) -> Self {
        Operand::Ids(ids.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_from_single_and_sequences() {
        assert_eq!(Ids::from(7u64).as_slice(), &[7]);
        assert_eq!(Ids::from(vec![3u64, 1, 3]).as_slice(), &[3, 1, 3]);
        assert_eq!(Ids::from(&[5u64, 4][..]).as_slice(), &[5, 4]);
        assert_eq!(Ids::from([9u64, 8, 7]).into_vec(), vec![9, 8, 7]);
        assert!(Ids::from(Vec::new()).is_empty());
    }

    #[test]
    fn test_ids_collect() {
        let ids: Ids = (1..=3).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.as_ref(), &[1, 2, 3]);
    }
}

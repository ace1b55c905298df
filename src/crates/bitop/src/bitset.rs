//! Store-backed bitset handles and the operations they share.
//!
//! Two handle shapes exist:
//! - [`Bitset`]: a store key bound to a client.
//! - [`BitsetData`]: the result of filtering an id list, which also keeps
//!   the surviving ids. Equality compares those ids, not the key.
//!
//! Both implement [`BitOperations`], so results of any operation can be fed
//! straight into the next one.

use std::fmt;

use bitop_store::{BitOp, BitStore};
use tracing::debug;

use crate::client::BitopClient;
use crate::error::Result;
use crate::naming::FilterKind;
use crate::operand::{Ids, Operand};
use crate::probe;

/// Answer of a membership test.
///
/// A single id yields [`Membership::One`]; any other number of ids yields
/// [`Membership::Many`], aligned with the input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    One(bool),
    Many(Vec<bool>),
}

impl Membership {
    fn from_vec(mut present: Vec<bool>) -> Self {
        match present.len() {
            1 => Membership::One(present.remove(0)),
            _ => Membership::Many(present),
        }
    }

    /// The scalar answer, if exactly one id was tested.
    pub fn one(&self) -> Option<bool> {
        match self {
            Membership::One(present) => Some(*present),
            Membership::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<bool> {
        match self {
            Membership::One(present) => vec![present],
            Membership::Many(present) => present,
        }
    }
}

/// A bitset stored under `key`.
pub struct Bitset<S> {
    client: BitopClient<S>,
    key: String,
}

impl<S> Bitset<S> {
    pub(crate) fn new(client: BitopClient<S>, key: String) -> Self {
        Self { client, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn client(&self) -> &BitopClient<S> {
        &self.client
    }
}

impl<S> Clone for Bitset<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            key: self.key.clone(),
        }
    }
}

impl<S> fmt::Debug for Bitset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitset").field("key", &self.key).finish()
    }
}

impl<S> fmt::Display for Bitset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// A bitset produced by filtering a literal id list.
pub struct BitsetData<S> {
    bitset: Bitset<S>,
    ids: Vec<u64>,
}

impl<S> BitsetData<S> {
    pub(crate) fn new(bitset: Bitset<S>, ids: Vec<u64>) -> Self {
        Self { bitset, ids }
    }

    /// Ids that survived the filter, in candidate order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<u64> {
        self.ids
    }

    pub fn as_bitset(&self) -> &Bitset<S> {
        &self.bitset
    }

    pub fn into_bitset(self) -> Bitset<S> {
        self.bitset
    }
}

impl<S> Clone for BitsetData<S> {
    fn clone(&self) -> Self {
        Self {
            bitset: self.bitset.clone(),
            ids: self.ids.clone(),
        }
    }
}

impl<S> fmt::Debug for BitsetData<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitsetData")
            .field("key", &self.bitset.key)
            .field("ids", &self.ids)
            .finish()
    }
}

impl<S> AsRef<[u64]> for BitsetData<S> {
    fn as_ref(&self) -> &[u64] {
        &self.ids
    }
}

impl<S, T> PartialEq<BitsetData<T>> for BitsetData<S> {
    fn eq(&self, other: &BitsetData<T>) -> bool {
        self.ids == other.ids
    }
}

impl<S> PartialEq<Vec<u64>> for BitsetData<S> {
    fn eq(&self, other: &Vec<u64>) -> bool {
        &self.ids == other
    }
}

impl<S> PartialEq<[u64]> for BitsetData<S> {
    fn eq(&self, other: &[u64]) -> bool {
        self.ids == other
    }
}

impl<S> PartialEq<&[u64]> for BitsetData<S> {
    fn eq(&self, other: &&[u64]) -> bool {
        self.ids == *other
    }
}

impl<S, const N: usize> PartialEq<[u64; N]> for BitsetData<S> {
    fn eq(&self, other: &[u64; N]) -> bool {
        self.ids == other
    }
}

impl<S> PartialEq<BitsetData<S>> for Vec<u64> {
    fn eq(&self, other: &BitsetData<S>) -> bool {
        self == &other.ids
    }
}

/// Result of an operation whose shape depends on its operand.
pub enum Derived<S> {
    Bitset(Bitset<S>),
    Data(BitsetData<S>),
}

impl<S> Derived<S> {
    pub fn as_bitset(&self) -> &Bitset<S> {
        match self {
            Derived::Bitset(bitset) => bitset,
            Derived::Data(data) => data.as_bitset(),
        }
    }

    /// The surviving ids, if this result came from an id-list filter.
    pub fn ids(&self) -> Option<&[u64]> {
        match self {
            Derived::Bitset(_) => None,
            Derived::Data(data) => Some(data.ids()),
        }
    }

    pub fn into_data(self) -> Option<BitsetData<S>> {
        match self {
            Derived::Bitset(_) => None,
            Derived::Data(data) => Some(data),
        }
    }

    pub fn into_bitset(self) -> Bitset<S> {
        match self {
            Derived::Bitset(bitset) => bitset,
            Derived::Data(data) => data.into_bitset(),
        }
    }
}

impl<S> Clone for Derived<S> {
    fn clone(&self) -> Self {
        match self {
            Derived::Bitset(bitset) => Derived::Bitset(bitset.clone()),
            Derived::Data(data) => Derived::Data(data.clone()),
        }
    }
}

impl<S> fmt::Debug for Derived<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derived::Bitset(bitset) => f.debug_tuple("Bitset").field(bitset).finish(),
            Derived::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}

/// Operations shared by every bitset handle.
///
/// Implementors only point at their underlying [`Bitset`]; every operation
/// is provided on top of it.
pub trait BitOperations<S: BitStore> {
    fn bitset(&self) -> &Bitset<S>;

    fn key<'k>(&'k self) -> &'k str
    where
        S: 'k,
    {
        self.bitset().key()
    }

    /// Test membership of one or more ids.
    fn member(&self, ids: impl Into<Ids>) -> Result<Membership> {
        let ids = ids.into();
        let present = probe::probe_each(self.bitset(), ids.as_slice())?;
        Ok(Membership::from_vec(present))
    }

    /// Test membership of a single id.
    fn contains(&self, id: u64) -> Result<bool> {
        probe::probe(self.bitset(), id)
    }

    /// Delete the underlying key.
    fn reset(&self) -> Result<()> {
        let bitset = self.bitset();
        let removed = bitset.client().store().delete(bitset.key())?;
        debug!("reset {} ({} key removed)", bitset.key(), removed);
        Ok(())
    }

    /// Number of set bits.
    fn size(&self) -> Result<u64> {
        let bitset = self.bitset();
        Ok(bitset.client().store().bit_count(bitset.key())?)
    }

    /// Bitwise NOT, covering every bit the store tracks for the key.
    fn complement(&self) -> Result<Bitset<S>> {
        let bitset = self.bitset();
        bitset.client().compose(BitOp::Not, &[bitset])
    }

    fn xor<O: BitOperations<S> + ?Sized>(&self, other: &O) -> Result<Bitset<S>> {
        let bitset = self.bitset();
        bitset.client().compose(BitOp::Xor, &[bitset, other.bitset()])
    }

    fn union<O: BitOperations<S> + ?Sized>(&self, other: &O) -> Result<Bitset<S>> {
        let bitset = self.bitset();
        bitset.client().compose(BitOp::Or, &[bitset, other.bitset()])
    }

    fn intersect_bitset<O: BitOperations<S> + ?Sized>(&self, other: &O) -> Result<Bitset<S>> {
        let bitset = self.bitset();
        bitset.client().compose(BitOp::And, &[bitset, other.bitset()])
    }

    /// Keep the candidates that are members of this bitset.
    fn intersect_ids(&self, ids: impl Into<Ids>) -> Result<BitsetData<S>> {
        let bitset = self.bitset();
        bitset.client().filter(FilterKind::Select, bitset, ids)
    }

    /// `self XOR (self AND other)`: the store has no native set-minus.
    fn difference_bitset<O: BitOperations<S> + ?Sized>(&self, other: &O) -> Result<Bitset<S>> {
        let common = self.intersect_bitset(other)?;
        self.xor(&common)
    }

    /// Keep the candidates that are NOT members of this bitset.
    fn difference_ids(&self, ids: impl Into<Ids>) -> Result<BitsetData<S>> {
        let bitset = self.bitset();
        bitset.client().filter(FilterKind::Reject, bitset, ids)
    }

    fn intersect<'a>(&self, operand: impl Into<Operand<'a, S>>) -> Result<Derived<S>>
    where
        S: 'a,
    {
        match operand.into() {
            Operand::Bitset(other) => self.intersect_bitset(other).map(Derived::Bitset),
            Operand::Ids(ids) => self.intersect_ids(ids).map(Derived::Data),
        }
    }

    fn difference<'a>(&self, operand: impl Into<Operand<'a, S>>) -> Result<Derived<S>>
    where
        S: 'a,
    {
        match operand.into() {
            Operand::Bitset(other) => self.difference_bitset(other).map(Derived::Bitset),
            Operand::Ids(ids) => self.difference_ids(ids).map(Derived::Data),
        }
    }
}

impl<S: BitStore> BitOperations<S> for Bitset<S> {
    fn bitset(&self) -> &Bitset<S> {
        self
    }
}

impl<S: BitStore> BitOperations<S> for BitsetData<S> {
    fn bitset(&self) -> &Bitset<S> {
        &self.bitset
    }
}

impl<S: BitStore> BitOperations<S> for Derived<S> {
    fn bitset(&self) -> &Bitset<S> {
        self.as_bitset()
    }
}

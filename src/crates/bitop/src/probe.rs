//! Single-bit reads against a bitset.

use bitop_store::BitStore;
use tracing::trace;

use crate::bitset::Bitset;
use crate::error::Result;

/// Whether `id` is set in `bitset`. One get-bit round trip.
pub fn probe<S: BitStore>(bitset: &Bitset<S>, id: u64) -> Result<bool> {
    let present = bitset.client().store().get_bit(bitset.key(), id)?;
    trace!("probe {}[{}] = {}", bitset.key(), id, present);
    Ok(present)
}

/// Probe every id in order, one round trip each.
pub fn probe_each<S: BitStore>(bitset: &Bitset<S>, ids: &[u64]) -> Result<Vec<bool>> {
    ids.iter().map(|&id| probe(bitset, id)).collect()
}

/// Probe every id with one batched store call. Results align with `ids`.
pub fn probe_batched<S: BitStore>(bitset: &Bitset<S>, ids: &[u64]) -> Result<Vec<bool>> {
    Ok(bitset.client().store().get_bits(bitset.key(), ids)?)
}

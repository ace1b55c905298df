//! Filtering a literal id list against a bitset.
//!
//! Candidates are probed against the subject first, then every survivor is
//! written into the destination key. Nothing here is transactional: the
//! subject may change between probes, and a failure while writing leaves
//! the destination with whatever bits were already set.

use bitop_store::BitStore;
use tracing::{debug, warn};

use crate::bitset::{Bitset, BitsetData};
use crate::client::BitopClient;
use crate::error::Result;
use crate::naming::FilterKind;
use crate::operand::Ids;
use crate::probe;

/// Materializes id-list compositions (select / reject) as new bitsets.
pub struct FilterEngine<'a, S> {
    client: &'a BitopClient<S>,
}

impl<'a, S: BitStore> FilterEngine<'a, S> {
    pub fn new(client: &'a BitopClient<S>) -> Self {
        Self { client }
    }

    /// Filter `candidates` by their membership in `subject`.
    ///
    /// [`FilterKind::Select`] keeps candidates present in `subject`;
    /// [`FilterKind::Reject`] keeps candidates absent from it. The result
    /// is named after the full, unfiltered candidate list and keeps the
    /// survivors in candidate order (duplicates included).
    pub fn filter(
        &self,
        kind: FilterKind,
        subject: &Bitset<S>,
        candidates: impl Into<Ids>,
    ) -> Result<BitsetData<S>> {
        let candidates = candidates.into().into_vec();
        let dest = self.client.namer().filter_key(kind, &candidates);
        let batched = self.client.config().batch_probes;

        let present = if batched {
            probe::probe_batched(subject, &candidates)?
        } else {
            probe::probe_each(subject, &candidates)?
        };

        let survivors: Vec<u64> = candidates
            .iter()
            .zip(present)
            .filter(|&(_, present)| kind.keeps(present))
            .map(|(&id, _)| id)
            .collect();

        self.materialize(&dest, &survivors, batched)?;

        debug!(
            "{} {} on {}: kept {} of {} candidate(s)",
            kind,
            dest,
            subject.key(),
            survivors.len(),
            candidates.len()
        );

        Ok(BitsetData::new(self.client.bitset(dest), survivors))
    }

    fn materialize(&self, dest: &str, survivors: &[u64], batched: bool) -> Result<()> {
        let store = self.client.store();

        if batched {
            if let Err(e) = store.set_bits(dest, survivors, true) {
                warn!("batched write into {} failed: {}", dest, e);
                return Err(e.into());
            }
            return Ok(());
        }

        for (written, &id) in survivors.iter().enumerate() {
            if let Err(e) = store.set_bit(dest, id, true) {
                warn!(
                    "write into {} failed after {} of {} bit(s): {}",
                    dest,
                    written,
                    survivors.len(),
                    e
                );
                return Err(e.into());
            }
        }

        Ok(())
    }
}

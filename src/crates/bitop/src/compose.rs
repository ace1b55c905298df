//! Whole-key boolean composition.

use bitop_store::{BitOp, BitStore};
use tracing::debug;

use crate::bitset::Bitset;
use crate::client::BitopClient;
use crate::error::Result;

/// Runs NOT/AND/OR/XOR over whole keys with the store's native primitive.
pub struct CompositionEngine<'a, S> {
    client: &'a BitopClient<S>,
}

impl<'a, S: BitStore> CompositionEngine<'a, S> {
    pub fn new(client: &'a BitopClient<S>) -> Self {
        Self { client }
    }

    /// Compose `operands` with `op` into a freshly named bitset.
    ///
    /// The destination is named after the operand keys in the order given
    /// and is overwritten on every call. Exactly one store round trip.
    pub fn compose(&self, op: BitOp, operands: &[&Bitset<S>]) -> Result<Bitset<S>> {
        let keys: Vec<&str> = operands.iter().map(|bitset| bitset.key()).collect();
        let dest = self.client.namer().composition_key(op, &keys);

        let len = self.client.store().bit_op(op, &dest, &keys)?;
        debug!("BITOP {} {} over {} key(s), {} bytes", op, dest, keys.len(), len);

        Ok(self.client.bitset(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitop_store::MemoryStore;

    fn setup() -> BitopClient<MemoryStore> {
        let client = BitopClient::with_namespace(MemoryStore::new(), "ev").unwrap();
        for id in [1, 2, 3] {
            client.store().set_bit("ev_a", id, true).unwrap();
        }
        for id in [2, 3, 4] {
            client.store().set_bit("ev_b", id, true).unwrap();
        }
        client
    }

    #[test]
    fn test_compose_names_and_materializes() {
        let client = setup();
        let (a, b) = (client.bitset("ev_a"), client.bitset("ev_b"));
        let engine = CompositionEngine::new(&client);

        let and = engine.compose(BitOp::And, &[&a, &b]).unwrap();
        assert_eq!(and.key(), "ev_bitop_AND_ev_a-ev_b");
        assert_eq!(client.store().ones(and.key()), vec![2, 3]);

        let xor = engine.compose(BitOp::Xor, &[&b, &a]).unwrap();
        assert_eq!(xor.key(), "ev_bitop_XOR_ev_b-ev_a");
        assert_eq!(client.store().ones(xor.key()), vec![1, 4]);
    }

    #[test]
    fn test_compose_over_many_operands() {
        let client = setup();
        client.store().set_bit("ev_c", 3, true).unwrap();
        let (a, b, c) = (
            client.bitset("ev_a"),
            client.bitset("ev_b"),
            client.bitset("ev_c"),
        );

        let and = CompositionEngine::new(&client)
            .compose(BitOp::And, &[&a, &b, &c])
            .unwrap();
        assert_eq!(and.key(), "ev_bitop_AND_ev_a-ev_b-ev_c");
        assert_eq!(client.store().ones(and.key()), vec![3]);
    }

    #[test]
    fn test_compose_overwrites_destination() {
        let client = setup();
        let (a, b) = (client.bitset("ev_a"), client.bitset("ev_b"));
        let engine = CompositionEngine::new(&client);

        let first = engine.compose(BitOp::Or, &[&a, &b]).unwrap();
        client.store().set_bit(first.key(), 60, true).unwrap();

        let second = engine.compose(BitOp::Or, &[&a, &b]).unwrap();
        assert_eq!(first.key(), second.key());
        assert_eq!(client.store().ones(second.key()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_not_with_two_operands_fails() {
        let client = setup();
        let (a, b) = (client.bitset("ev_a"), client.bitset("ev_b"));

        let err = CompositionEngine::new(&client)
            .compose(BitOp::Not, &[&a, &b])
            .unwrap_err();
        assert!(matches!(
            err,
            crate::BitopError::Store(bitop_store::StoreError::Arity { .. })
        ));
    }
}

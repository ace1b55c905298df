//! Failure behavior of filters and compositions against a store that
//! starts failing after a number of writes.

use std::sync::atomic::{AtomicUsize, Ordering};

use bitop::{BitOp, BitOperations, BitopClient, BitopConfig, BitopError};
use bitop_store::{BitStore, MemoryStore, Result, StoreError};

/// Delegates to a [`MemoryStore`] but fails every `set_bit` after the
/// first `budget` ones.
struct FlakyStore {
    inner: MemoryStore,
    budget: AtomicUsize,
    writes: AtomicUsize,
}

impl FlakyStore {
    fn new(budget: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            budget: AtomicUsize::new(budget),
            writes: AtomicUsize::new(0),
        }
    }

    fn seed(&self, key: &str, ids: &[u64]) {
        for &id in ids {
            self.inner.set_bit(key, id, true).expect("seed");
        }
    }
}

impl BitStore for FlakyStore {
    fn get_bit(&self, key: &str, offset: u64) -> Result<bool> {
        self.inner.get_bit(key, offset)
    }

    fn set_bit(&self, key: &str, offset: u64, value: bool) -> Result<bool> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.budget.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        self.inner.set_bit(key, offset, value)
    }

    fn bit_count(&self, key: &str) -> Result<u64> {
        self.inner.bit_count(key)
    }

    fn bit_op(&self, op: BitOp, dest: &str, sources: &[&str]) -> Result<u64> {
        self.inner.bit_op(op, dest, sources)
    }

    fn delete(&self, key: &str) -> Result<u64> {
        self.inner.delete(key)
    }
}

#[test]
fn failure_mid_filter_leaves_partial_destination() {
    let store = FlakyStore::new(2);
    store.seed("ev_a", &[1, 2, 3, 4]);

    let client = BitopClient::with_namespace(store, "ev").unwrap();
    let a = client.scoped("a");

    let err = a.intersect_ids([1u64, 2, 3, 4]).unwrap_err();
    match err {
        BitopError::Store(StoreError::Backend(e)) => assert_eq!(e.to_string(), "connection reset"),
        other => panic!("unexpected error: {other:?}"),
    }

    // the two writes that made it are visible to later readers
    let partial = client.bitset("ev_bitop_data-AND_1-2-3-4");
    assert_eq!(partial.size().unwrap(), 2);
    assert!(partial.contains(1).unwrap());
    assert!(partial.contains(2).unwrap());
    assert!(!partial.contains(3).unwrap());
}

#[test]
fn rerunning_a_filter_completes_the_destination() {
    let store = FlakyStore::new(1);
    store.seed("ev_a", &[5, 6]);

    let client = BitopClient::with_namespace(store, "ev").unwrap();
    let a = client.scoped("a");
    assert!(a.intersect_ids([5u64, 6]).is_err());
    assert_eq!(client.store().inner.ones("ev_bitop_data-AND_5-6"), vec![5]);

    client.store().budget.store(usize::MAX, Ordering::SeqCst);

    let data = a.intersect_ids([5u64, 6]).unwrap();
    assert_eq!(data, vec![5, 6]);
    assert_eq!(data.size().unwrap(), 2);
}

#[test]
fn batched_filter_uses_default_batch_primitives() {
    let store = FlakyStore::new(usize::MAX);
    store.seed("ev_a", &[1, 3]);

    let config = BitopConfig::new("ev").with_batch_probes(true);
    let client = BitopClient::new(store, config).unwrap();

    let data = client.scoped("a").difference_ids([1u64, 2, 3, 4]).unwrap();
    assert_eq!(data, vec![2, 4]);
    assert_eq!(client.store().inner.ones(data.key()), vec![2, 4]);
}

#[test]
fn composition_errors_propagate_unchanged() {
    let client = BitopClient::with_namespace(FlakyStore::new(0), "ev").unwrap();
    let a = client.scoped("a");
    let b = client.scoped("b");

    let err = client.compose(BitOp::Not, &[&a, &b]).unwrap_err();
    assert!(matches!(
        err,
        BitopError::Store(StoreError::Arity {
            op: BitOp::Not,
            expected: 1,
            actual: 2
        })
    ));
}

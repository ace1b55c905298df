use std::fmt;
use std::sync::Arc;

use bitop_store::{BitOp, BitStore};

use crate::bitset::{Bitset, BitsetData};
use crate::compose::CompositionEngine;
use crate::config::BitopConfig;
use crate::error::Result;
use crate::filter::FilterEngine;
use crate::naming::{FilterKind, KeyNamer};
use crate::operand::Ids;

struct Inner<S> {
    store: S,
    namer: KeyNamer,
    config: BitopConfig,
}

/// Entry point binding a store to a key namespace.
///
/// Cloning is cheap; clones share the same store. Every handle minted by a
/// client keeps a clone of it, so derived bitsets can keep composing.
pub struct BitopClient<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for BitopClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for BitopClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitopClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl<S: BitStore> BitopClient<S> {
    pub fn new(store: S, config: BitopConfig) -> Result<Self> {
        config.validate()?;

        let namer = KeyNamer::new(config.namespace.clone());
        Ok(Self {
            inner: Arc::new(Inner {
                store,
                namer,
                config,
            }),
        })
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Result<Self> {
        Self::new(store, BitopConfig::new(namespace))
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    pub fn namer(&self) -> &KeyNamer {
        &self.inner.namer
    }

    pub fn config(&self) -> &BitopConfig {
        &self.inner.config
    }

    /// Handle for an existing key, used verbatim.
    pub fn bitset(&self, key: impl Into<String>) -> Bitset<S> {
        Bitset::new(self.clone(), key.into())
    }

    /// Handle for `<namespace>_<name>`.
    pub fn scoped(&self, name: &str) -> Bitset<S> {
        self.bitset(self.inner.namer.scoped(name))
    }

    pub fn compose(&self, op: BitOp, operands: &[&Bitset<S>]) -> Result<Bitset<S>> {
        CompositionEngine::new(self).compose(op, operands)
    }

    pub fn filter(
        &self,
        kind: FilterKind,
        subject: &Bitset<S>,
        candidates: impl Into<Ids>,
    ) -> Result<BitsetData<S>> {
        FilterEngine::new(self).filter(kind, subject, candidates)
    }
}

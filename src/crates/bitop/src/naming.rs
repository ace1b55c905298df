//! Deterministic names for derived bitsets.
//!
//! Every derived key has the shape `<namespace>_bitop_<kind>_<operands>`,
//! where operands are joined with `-` in the order they were supplied.
//! Order is never canonicalized: `A OR B` and `B OR A` land under different
//! keys even though their contents are identical.

use std::fmt::{self, Write};

use bitop_store::BitOp;

/// Marker between the namespace and the operation kind.
pub const BIT_OPERATION_PREFIX: &str = "bitop";

/// Prefix applied to the kind of id-list operations.
pub const DATA_KIND_PREFIX: &str = "data-";

/// Direction of an id-list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Keep candidates present in the subject (AND-with-list).
    Select,
    /// Keep candidates absent from the subject (MINUS-with-list).
    Reject,
}

impl FilterKind {
    /// Name of the boolean operation the filter stands for.
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterKind::Select => "AND",
            FilterKind::Reject => "MINUS",
        }
    }

    /// Whether a candidate with the given membership survives the filter.
    pub fn keeps(&self, present: bool) -> bool {
        match self {
            FilterKind::Select => present,
            FilterKind::Reject => !present,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DATA_KIND_PREFIX, self.op_name())
    }
}

/// Builds destination keys under a fixed namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyNamer {
    namespace: String,
}

impl KeyNamer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name the result of `kind` applied to `operands`, in order.
    pub fn name<I>(&self, kind: impl fmt::Display, operands: I) -> String
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut key = format!("{}_{}_{}_", self.namespace, BIT_OPERATION_PREFIX, kind);
        for (i, operand) in operands.into_iter().enumerate() {
            if i > 0 {
                key.push('-');
            }
            // writing into a String cannot fail
            let _ = write!(key, "{}", operand);
        }
        key
    }

    /// Key of a whole-key composition over `keys`.
    pub fn composition_key(&self, op: BitOp, keys: &[&str]) -> String {
        self.name(op, keys)
    }

    /// Key of an id-list filter, named after the unfiltered candidates.
    pub fn filter_key(&self, kind: FilterKind, candidates: &[u64]) -> String {
        self.name(kind, candidates)
    }

    /// Key of a raw bitset living under this namespace.
    pub fn scoped(&self, name: &str) -> String {
        format!("{}_{}", self.namespace, name)
    }
}

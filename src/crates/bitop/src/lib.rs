//! Composable algebra of store-backed bitsets.
//!
//! Each bitset is a store key whose bits mark membership of integer ids.
//! Bitsets compose with AND/OR/XOR/NOT through the store's native bitwise
//! primitive, or filter a literal id list bit by bit. Every result is a new,
//! deterministically named key wrapped in a handle that supports the same
//! operations, so expressions nest to any depth.
//!
//! This crate provides:
//! - Handles and shared operations: [`bitset`] module
//! - Destination key naming: [`naming`] module
//! - Key-vs-key composition: [`compose`] module
//! - Id-list filtering: [`filter`] module
//! - Operator sugar: [`ops`] module
//!
//! # Examples
//!
//! ```
//! use bitop::{BitOperations, BitopClient};
//! use bitop_store::{BitStore, MemoryStore};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let client = BitopClient::with_namespace(MemoryStore::new(), "ev")?;
//! for id in [10, 20, 30] {
//!     client.store().set_bit("ev_day1", id, true)?;
//! }
//! for id in [20, 30, 40] {
//!     client.store().set_bit("ev_day2", id, true)?;
//! }
//!
//! let day1 = client.scoped("day1");
//! let day2 = client.scoped("day2");
//!
//! let both = (&day1 & &day2)?;
//! assert_eq!(both.key(), "ev_bitop_AND_ev_day1-ev_day2");
//! assert_eq!(both.size()?, 2);
//!
//! let newcomers = day1.difference_ids([20, 40, 50])?;
//! assert_eq!(newcomers, [40, 50]);
//! # Ok(())
//! # }
//! ```

// Core error types used throughout the crate
pub mod error;

// Client configuration
pub mod config;

// Destination key naming
pub mod naming;

// Single-bit reads
pub mod probe;

// Store-backed handles and shared operations
pub mod bitset;

// Operand shapes for binary operations
pub mod operand;

// Key-vs-key composition
pub mod compose;

// Id-list filtering
pub mod filter;

// Store + namespace entry point
pub mod client;

// Operator overloads
pub mod ops;

pub use bitset::{BitOperations, Bitset, BitsetData, Derived, Membership};
pub use client::BitopClient;
pub use compose::CompositionEngine;
pub use config::BitopConfig;
pub use error::{BitopError, Result};
pub use filter::FilterEngine;
pub use naming::{FilterKind, KeyNamer};
pub use operand::{Ids, Operand};

pub use bitop_store::{BitOp, BitStore};

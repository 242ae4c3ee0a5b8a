//! Open-addressing collections.
//!
//! The centerpiece is [`hash::open::HashTable`], a generic hash table that
//! resolves collisions by perturbation probing, marks deletions with
//! tombstones and grows once it is more than two thirds full.
//! [`hash::locked::LockedTable`] wraps it behind a whole-table lock for
//! callers that share one table between threads.
#![no_std]

extern crate alloc;

pub mod hash;

pub use hash::locked::LockedTable;
pub use hash::open::{HashTable, TableBuilder, TableError};

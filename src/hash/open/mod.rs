//! # Open-addressing hash table
//!
//! All entries live directly in one power-of-two array of slots. A lookup
//! starts at `hash & (capacity - 1)` and follows a perturbation sequence
//! until it reaches the key or an empty slot.
//!
//! ## Core Components
//!
//! - [`table::HashTable`]: the table itself.
//! - [`builder::TableBuilder`]: capacity and hasher configuration.
//! - [`iter`]: borrowing, mutable, owning and draining iterators.
//! - [`error::TableError`]: failures surfaced by strict accessors.
//!
//! ## Growth
//!
//! The table counts tombstones as used slots. When an insert pushes the used
//! count above two thirds of the capacity, every live entry is moved into a
//! larger array (four times larger up to [`LARGE_THRESHOLD`] slots, twice as
//! large beyond it) and all tombstones are dropped. The table never shrinks.

mod builder;
mod error;
mod iter;
mod probe;
mod slot;
mod table;

#[cfg(test)]
mod tests;

pub use builder::TableBuilder;
pub use error::TableError;
pub use iter::{Drain, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use table::HashTable;

/// Number of slots in a freshly created table.
pub const INITIAL_CAPACITY: usize = 8;

/// Bits dropped from the perturbation value after every probe step.
pub const PERTURB_SHIFT: u32 = 5;

/// Capacity above which the table doubles instead of quadrupling.
pub const LARGE_THRESHOLD: usize = 50_000;

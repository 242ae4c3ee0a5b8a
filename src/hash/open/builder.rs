use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;

use super::table::HashTable;
use crate::hash::locked::LockedTable;

/// Builder for [`HashTable`] and [`LockedTable`].
///
/// # Examples
///
/// ```
/// use probe_collections::TableBuilder;
///
/// let table = TableBuilder::new().with_capacity(100).build::<u32, &str>();
/// assert_eq!(table.capacity(), 256);
/// assert!(table.is_empty());
/// ```
pub struct TableBuilder<S = DefaultHashBuilder> {
    capacity: usize,
    hash_builder: S,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Create a new builder with default settings.
    ///
    /// # Returns
    /// A builder for an empty table of the initial capacity
    pub fn new() -> Self {
        Self {
            capacity: 0,
            hash_builder: DefaultHashBuilder::default(),
        }
    }
}

impl<S> TableBuilder<S>
where
    S: BuildHasher,
{
    /// Set a custom hasher for the table.
    ///
    /// # Arguments
    /// * `hasher` - The hash builder to use
    ///
    /// # Returns
    /// The builder, now producing tables that hash with `hasher`
    pub fn with_hasher<T>(self, hasher: T) -> TableBuilder<T>
    where
        T: BuildHasher,
    {
        TableBuilder {
            capacity: self.capacity,
            hash_builder: hasher,
        }
    }

    /// Reserve room for a number of entries.
    ///
    /// # Arguments
    /// * `entries` - How many inserts the table must accept before it grows
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn with_capacity(mut self, entries: usize) -> Self {
        self.capacity = entries;
        self
    }

    /// Build a single-threaded table.
    pub fn build<K, V>(self) -> HashTable<K, V, S>
    where
        K: Hash + Eq,
    {
        HashTable::with_capacity_and_hasher(self.capacity, self.hash_builder)
    }

    /// Build a table guarded by a read-write lock.
    pub fn build_locked<K, V>(self) -> LockedTable<K, V, S>
    where
        K: Hash + Eq,
    {
        LockedTable::from(self.build::<K, V>())
    }
}

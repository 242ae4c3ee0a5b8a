//! Whole-table locking for shared access.
//!
//! [`HashTable`] has no interior synchronization. [`LockedTable`] puts one
//! behind a spin-based read-write lock: lookups take the read lock, and every
//! mutation (including any rehash it triggers) runs under the write lock.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;
use spin::RwLock;

use crate::hash::open::{HashTable, TableError};

/// A [`HashTable`] shared between threads through a read-write lock.
pub struct LockedTable<K, V, S = DefaultHashBuilder> {
    pub(crate) table: RwLock<HashTable<K, V, S>>,
}

impl<K, V> LockedTable<K, V> {
    /// Create a new locked table with the initial capacity.
    pub fn new() -> Self {
        Self::from(HashTable::new())
    }
}

impl<K, V> Default for LockedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> From<HashTable<K, V, S>> for LockedTable<K, V, S> {
    fn from(table: HashTable<K, V, S>) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

impl<K, V, S> LockedTable<K, V, S> {
    /// Get the number of live entries.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Clear all entries. The capacity is kept.
    pub fn clear(&self) {
        self.table.write().clear();
    }

    /// Unwrap the lock and return the inner table.
    pub fn into_inner(self) -> HashTable<K, V, S> {
        self.table.into_inner()
    }
}

impl<K, V, S> LockedTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Insert a key-value pair into the table.
    ///
    /// # Arguments
    /// * `key` - The key to insert
    /// * `value` - The value to insert
    ///
    /// # Returns
    /// The previous value associated with the key, if any
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.table.write().insert(key, value)
    }

    /// Remove a key from the table.
    ///
    /// # Returns
    /// The removed value, or [`TableError::KeyNotFound`]
    pub fn remove<Q>(&self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.table.write().remove(key)
    }

    /// Check if a key exists in the table.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.table.read().contains_key(key)
    }

    /// Get a copy of the value associated with a key.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
        V: Clone,
    {
        self.view(key, |_, v| v.clone())
    }

    /// Read an entry under the read lock and compute a result using a closure.
    ///
    /// The closure runs while the lock is held and should not block.
    ///
    /// # Returns
    /// * `Some(R)` - If the key exists, returns the closure's result
    /// * `None` - If the key does not exist
    pub fn view<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
        F: FnOnce(&K, &V) -> R,
    {
        let table = self.table.read();
        table.get_key_value(key).map(|(k, v)| f(k, v))
    }

    /// Modify an existing entry in place under the write lock.
    ///
    /// # Returns
    /// The result of the closure if the key exists, None otherwise
    pub fn alter<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
        F: FnOnce(&mut V) -> R,
    {
        let mut table = self.table.write();
        table.get_mut(key).map(f)
    }

    /// Modify an entry, inserting `default()` first if the key is absent.
    pub fn alter_entry<F, D>(&self, key: K, default: D, f: F)
    where
        F: FnOnce(&mut V),
        D: FnOnce() -> V,
    {
        let mut table = self.table.write();
        f(table.get_or_insert_with(key, default));
    }
}

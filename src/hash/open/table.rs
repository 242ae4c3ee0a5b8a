use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::{self, Debug};
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::ops::Index;

use hashbrown::DefaultHashBuilder;
use log::{debug, trace};

use super::error::TableError;
use super::iter::{Drain, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use super::probe::ProbeSeq;
use super::slot::Slot;
use super::{INITIAL_CAPACITY, LARGE_THRESHOLD};

/// Outcome of walking a key's probe sequence.
enum Probe {
    /// The key sits in this slot.
    Found(usize),
    /// The key is absent. It belongs in this slot, which is either the first
    /// tombstone seen on the way or the empty slot that ended the walk.
    Vacant(usize),
}

/// Returns `true` when `used` slots exceed two thirds of `capacity`.
#[inline]
pub(crate) fn over_loaded(used: usize, capacity: usize) -> bool {
    used * 3 > capacity * 2
}

/// Capacity after one growth step from `capacity`.
#[inline]
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    let factor = if capacity <= LARGE_THRESHOLD { 4 } else { 2 };
    capacity
        .checked_mul(factor)
        .unwrap_or_else(|| panic!("capacity overflow"))
}

/// Smallest valid capacity that holds `entries` without growing.
pub(crate) fn capacity_for(entries: usize) -> usize {
    let needed = entries
        .checked_mul(3)
        .map(|n| n.div_ceil(2))
        .and_then(usize::checked_next_power_of_two)
        .unwrap_or_else(|| panic!("capacity overflow"));
    needed.max(INITIAL_CAPACITY)
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// A hash table with open addressing, tombstone deletion and grow-only
/// resizing at a 2/3 load factor.
///
/// Keys need only `Hash + Eq`. Lookups accept any borrowed form of the key,
/// as with the standard maps.
///
/// # Examples
///
/// ```
/// use probe_collections::{HashTable, TableError};
///
/// let mut balances = HashTable::new();
/// balances.insert("alice", 30);
/// balances.insert("bob", 12);
///
/// assert_eq!(balances.get("alice"), Some(&30));
/// assert_eq!(balances.remove("bob"), Ok(12));
/// assert_eq!(balances.remove("bob"), Err(TableError::KeyNotFound));
/// assert_eq!(balances.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    pub(crate) slots: Vec<Slot<K, V>>,
    /// Occupied slots plus tombstones.
    pub(crate) used: usize,
    /// Occupied slots only.
    pub(crate) live: usize,
    pub(crate) hash_builder: S,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty table that accepts `entries` inserts before it grows.
    pub fn with_capacity(entries: usize) -> Self {
        Self::with_capacity_and_hasher(entries, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    pub fn with_capacity_and_hasher(entries: usize, hash_builder: S) -> Self {
        Self {
            slots: empty_slots(capacity_for(entries)),
            used: 0,
            live: 0,
            hash_builder,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots in the backing array. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry. The capacity is kept.
    pub fn clear(&mut self) {
        trace!("clearing table: {} live, {} slots", self.live, self.slots.len());
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.used = 0;
        self.live = 0;
    }

    /// Visits live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.live)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.live)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Moves every live entry out, leaving the table empty with its capacity
    /// unchanged.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        let capacity = self.slots.len();
        let slots = mem::replace(&mut self.slots, empty_slots(capacity));
        let live = mem::take(&mut self.live);
        self.used = 0;
        Drain::new(slots, live)
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Computes the hash the table uses for `key`.
    #[inline]
    pub fn hash_key<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Walks the probe sequence of `hash` looking for `key`.
    ///
    /// Terminates because the load factor keeps at least one slot empty.
    fn probe<Q>(&self, hash: u64, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut seq = ProbeSeq::new(hash, self.slots.len());
        let mut first_tombstone = None;
        loop {
            let index = seq.index();
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Occupied { hash: h, key: k, .. } if *h == hash && k.borrow() == key => {
                    return Probe::Found(index);
                }
                Slot::Tombstone { .. } if first_tombstone.is_none() => {
                    first_tombstone = Some(index);
                }
                _ => {}
            }
            seq.advance();
        }
    }

    #[inline]
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.hash_key(key), key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) => None,
        }
    }

    /// Writes a new entry into a vacant slot and grows the table if that
    /// pushed it past the load factor. Returns the entry's final position.
    fn occupy(&mut self, index: usize, hash: u64, key: K, value: V) -> usize {
        if self.slots[index].is_empty() {
            self.used += 1;
        } else {
            trace!("reusing tombstone at slot {index}");
        }
        self.slots[index] = Slot::Occupied { hash, key, value };
        self.live += 1;

        if over_loaded(self.used, self.slots.len()) {
            self.rehash(index)
        } else {
            index
        }
    }

    /// Moves all live entries into a larger array and drops tombstones.
    /// Returns the new position of the entry that was at `tracked`.
    fn rehash(&mut self, tracked: usize) -> usize {
        let old_capacity = self.slots.len();
        let new_capacity = grown_capacity(old_capacity);
        debug!(
            "rehashing table: {} -> {} slots, {} live, {} tombstones dropped",
            old_capacity,
            new_capacity,
            self.live,
            self.used - self.live
        );

        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        let mut relocated = tracked;
        let mut dropped = 0;
        for (old_index, slot) in old.into_iter().enumerate() {
            if slot.is_tombstone() {
                dropped += 1;
                continue;
            }
            let Some(hash) = slot.hash() else {
                continue;
            };
            let Some((key, value)) = slot.into_entry() else {
                continue;
            };
            // Keys are distinct and the new array has no tombstones, so
            // the first empty slot on the sequence is the entry's home.
            let mut seq = ProbeSeq::new(hash, new_capacity);
            while !self.slots[seq.index()].is_empty() {
                seq.advance();
            }
            if old_index == tracked {
                relocated = seq.index();
            }
            self.slots[seq.index()] = Slot::Occupied { hash, key, value };
        }
        debug_assert_eq!(dropped, self.used - self.live);
        self.used = self.live;
        relocated
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).and_then(|index| self.slots[index].entry())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(key)?;
        self.slots[index].entry_mut().map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but treats a missing key as an error.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(TableError::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Inserts or updates an entry.
    ///
    /// An existing key keeps its slot and its original key instance; only the
    /// value is swapped and the old one returned. A new key takes the first
    /// tombstone on its probe path, or the empty slot that ended the path.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_key(&key);
        match self.probe(hash, &key) {
            Probe::Found(index) => self.slots[index]
                .entry_mut()
                .map(|(_, slot)| mem::replace(slot, value)),
            Probe::Vacant(index) => {
                self.occupy(index, hash, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting `default()` first if the key is
    /// absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = self.hash_key(&key);
        let index = match self.probe(hash, &key) {
            Probe::Found(index) => index,
            Probe::Vacant(index) => self.occupy(index, hash, key, default()),
        };
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("probe result points at an occupied slot"),
        }
    }

    /// Removes `key` and returns its value.
    ///
    /// The slot becomes a tombstone, so it still counts toward the load
    /// factor until the next rehash.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(key).ok_or(TableError::KeyNotFound)?;
        let entry = self.slots[index].bury().ok_or(TableError::KeyNotFound)?;
        self.live -= 1;
        Ok(entry)
    }
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| v == ov))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for HashTable<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashTable<K, V, S>
where
    K: Eq + Hash + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn from(entries: [(K, V); N]) -> Self {
        let mut table = Self::with_capacity(N);
        table.extend(entries);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.live)
    }
}

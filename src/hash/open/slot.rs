/// State of a single position in the table.
///
/// `Empty` ends a probe sequence. `Tombstone` marks a deleted entry: probes
/// walk past it so that keys placed further along the same sequence stay
/// reachable, and inserts may reuse it.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied { hash: u64, key: K, value: V },
    Tombstone { hash: u64 },
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone { .. })
    }

    /// Hash stored in an occupied slot or tombstone.
    #[inline]
    pub(crate) fn hash(&self) -> Option<u64> {
        match self {
            Slot::Empty => None,
            Slot::Occupied { hash, .. } | Slot::Tombstone { hash } => Some(*hash),
        }
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    /// Replaces an occupied slot with a tombstone carrying the same hash and
    /// returns the evicted entry. Other slots are left as they are.
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        let hash = match self {
            Slot::Occupied { hash, .. } => *hash,
            _ => return None,
        };
        core::mem::replace(self, Slot::Tombstone { hash }).into_entry()
    }
}

use super::IdentityState;
use super::super::HashTable;
use super::super::slot::Slot;

fn table() -> HashTable<u64, &'static str, IdentityState> {
    HashTable::with_hasher(IdentityState::default())
}

fn key_at(table: &HashTable<u64, &'static str, IdentityState>, index: usize) -> Option<u64> {
    table.slots[index].entry().map(|(k, _)| *k)
}

fn tombstones(table: &HashTable<u64, &'static str, IdentityState>) -> usize {
    table.slots.iter().filter(|slot| slot.is_tombstone()).count()
}

#[test]
fn test_colliding_keys_follow_probe_sequence() {
    let mut table = table();
    table.insert(1, "one");
    // 9 & 7 == 1, so it probes on to (5 * 1 + 9 + 1) & 7 == 7.
    table.insert(9, "nine");
    // 17 passes 1 and 7, then lands on (5 * 7 + 0 + 1) & 7 == 4.
    table.insert(17, "seventeen");

    assert_eq!(key_at(&table, 1), Some(1));
    assert_eq!(key_at(&table, 7), Some(9));
    assert_eq!(key_at(&table, 4), Some(17));
    assert_eq!(table.get(&17), Some(&"seventeen"));
}

#[test]
fn test_probe_after_remove() {
    let mut table = table();
    table.insert(1, "one");
    table.insert(9, "nine");
    table.insert(17, "seventeen");

    assert_eq!(table.remove(&9), Ok("nine"));
    assert!(matches!(table.slots[7], Slot::Tombstone { hash: 9 }));
    // 17 is only reachable by walking past the tombstone at 7.
    assert_eq!(table.get(&17), Some(&"seventeen"));
    assert_eq!(table.get(&1), Some(&"one"));
    assert!(!table.contains_key(&9));
    assert_eq!(table.used, 3);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_tombstone_reuse() {
    let mut table = table();
    table.insert(1, "one");
    table.insert(9, "nine");
    assert_eq!(table.remove(&1), Ok("one"));
    assert_eq!(table.used, 2);

    // 17 starts at the tombstone left by 1, walks past 9 at slot 7 to the
    // empty slot 4, and is then written back into the tombstone.
    table.insert(17, "seventeen");
    assert_eq!(key_at(&table, 1), Some(17));
    assert!(table.slots[4].is_empty());
    assert_eq!(tombstones(&table), 0);
    assert_eq!(table.used, 2);
    assert_eq!(table.len(), 2);

    assert_eq!(table.get(&17), Some(&"seventeen"));
    assert_eq!(table.get(&9), Some(&"nine"));
    assert_eq!(table.get(&1), None);
}

#[test]
fn test_reinsert_reuses_own_tombstone() {
    let mut table = table();
    table.insert(1, "one");
    table.insert(2, "two");
    table.insert(3, "three");
    table.remove(&2).unwrap();

    table.insert(2, "two again");
    assert_eq!(key_at(&table, 2), Some(2));
    assert_eq!(table.used, 3);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(&2), Some(&"two again"));
}

#[test]
fn test_overwrite_stays_in_place() {
    let mut table = table();
    table.insert(1, "one");
    table.insert(9, "nine");
    assert_eq!(table.insert(9, "NINE"), Some("nine"));
    assert_eq!(key_at(&table, 7), Some(9));
    assert!(matches!(table.slots[7], Slot::Occupied { hash: 9, value: "NINE", .. }));
    assert_eq!(table.used, 2);
}

#[test]
fn test_only_first_tombstone_is_reused() {
    let mut table = table();
    table.insert(1, "one");
    table.insert(9, "nine");
    table.insert(17, "seventeen");
    table.remove(&9).unwrap();
    table.remove(&1).unwrap();

    // Both 1 and 7 are tombstones on the path of 25; the earlier one wins.
    table.insert(25, "twenty-five");
    assert_eq!(key_at(&table, 1), Some(25));
    assert!(table.slots[7].is_tombstone());
    assert_eq!(table.get(&17), Some(&"seventeen"));
}

#[test]
fn test_rehash_drops_tombstones() {
    let mut table = table();
    for k in 0..5 {
        table.insert(k, "x");
    }
    for k in 0..4 {
        table.remove(&k).unwrap();
    }
    assert_eq!(table.used, 5);
    assert_eq!(tombstones(&table), 4);

    // Slot 5 is empty and no tombstone lies on its path, so used reaches 6.
    table.insert(5, "y");
    assert_eq!(table.capacity(), 32);
    assert_eq!(tombstones(&table), 0);
    assert_eq!(table.used, 2);
    assert_eq!(table.len(), 2);
    assert_eq!(key_at(&table, 4), Some(4));
    assert_eq!(key_at(&table, 5), Some(5));
}

#[test]
fn test_every_rehash_sheds_tombstones() {
    let mut table = table();
    let mut capacity = table.capacity();
    let mut rehashes = 0;
    for k in 0..600u64 {
        table.insert(k, "v");
        if table.capacity() != capacity {
            capacity = table.capacity();
            rehashes += 1;
            assert_eq!(tombstones(&table), 0, "after growing to {capacity}");
            assert_eq!(table.used, table.len());
        }
        if k % 3 != 0 {
            table.remove(&k).unwrap();
        }
    }
    assert!(rehashes >= 3);
    assert_eq!(table.len(), 200);
    assert!((0..600u64).step_by(3).all(|k| table.contains_key(&k)));
}

#[test]
fn test_long_chain_from_one_start_slot() {
    let mut table = table();
    // Every key starts at slot 0 for capacities up to 1024.
    let keys: alloc::vec::Vec<u64> = (1..=200).map(|k| k * 1024).collect();
    for &k in &keys {
        table.insert(k, "k");
    }
    for &k in keys.iter().step_by(3) {
        table.remove(&k).unwrap();
    }
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(table.contains_key(k), i % 3 != 0, "key {k}");
    }
}

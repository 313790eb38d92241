// SyncOrderedHashMap test suite: the reader-writer locked map under
// real threads.
//
// The core invariants exercised:
// - Atomicity: a grow-and-rehash is never observable half done; keys
//   that no thread removes always resolve, from any thread.
// - Serialization: each writer's own inserts keep their relative order
//   in the final insertion order.
// - Uniqueness under contention: one winner per duplicate key race.
// - Guards: compound read-modify-write sequences stay race-free under
//   the write guard.
use slab_hashmap::{InsertError, SyncOrderedHashMap};
use std::thread;

// Test: readers run against a concurrently mutating map.
// Assumes: lookups take the read lock; mutation takes the write lock.
// Verifies: stable keys always resolve with their original values while
// a writer churns disjoint keys through inserts and removals.
#[test]
fn readers_always_see_consistent_state() {
    let map = SyncOrderedHashMap::new();
    for n in 0..16u32 {
        map.insert(format!("stable-{n}"), n).unwrap();
    }

    thread::scope(|scope| {
        let churn = scope.spawn(|| {
            for round in 0..50u32 {
                for n in 0..8u32 {
                    map.insert(format!("churn-{round}-{n}"), n).unwrap();
                }
                for n in 0..8u32 {
                    map.remove(&format!("churn-{round}-{n}")).unwrap();
                }
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    for n in 0..16u32 {
                        assert_eq!(map.get(&format!("stable-{n}")), Some(n));
                    }
                    let guard = map.read();
                    let stable: Vec<u32> = guard
                        .iter()
                        .filter(|(k, _)| k.starts_with("stable-"))
                        .map(|(_, v)| *v)
                        .collect();
                    assert_eq!(stable, (0..16).collect::<Vec<_>>());
                }
            });
        }

        churn.join().unwrap();
    });

    assert_eq!(map.len(), 16);
}

// Test: two writers with disjoint key ranges.
// Assumes: the write lock serializes whole operations.
// Verifies: all keys land; each writer's keys keep their relative
// insertion order in the merged order.
#[test]
fn writers_interleave_without_loss() {
    let map = SyncOrderedHashMap::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for n in 0..24u32 {
                map.insert(format!("a-{n}"), n).unwrap();
            }
        });
        scope.spawn(|| {
            for n in 0..24u32 {
                map.insert(format!("b-{n}"), n).unwrap();
            }
        });
    });

    assert_eq!(map.len(), 48);
    let guard = map.read();
    let a_order: Vec<u32> = guard
        .iter()
        .filter(|(k, _)| k.starts_with("a-"))
        .map(|(_, v)| *v)
        .collect();
    let b_order: Vec<u32> = guard
        .iter()
        .filter(|(k, _)| k.starts_with("b-"))
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(a_order, (0..24).collect::<Vec<_>>());
    assert_eq!(b_order, (0..24).collect::<Vec<_>>());
}

// Test: duplicate key race.
// Assumes: insert is atomic under the write lock.
// Verifies: exactly one thread wins; the losers get DuplicateKey.
#[test]
fn duplicate_race_has_one_winner() {
    let map = SyncOrderedHashMap::new();

    let winners: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let map = &map;
                scope.spawn(move || map.insert("contested".to_string(), n).is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    assert_eq!(winners, 1);
    assert_eq!(map.len(), 1);
    assert!(map.get("contested").is_some());
}

// Test: compound operations under the write guard.
// Assumes: holding the guard excludes every other writer and reader.
// Verifies: concurrent check-then-update sequences never lose updates.
#[test]
fn write_guard_makes_check_then_update_atomic() {
    let map = SyncOrderedHashMap::new();
    map.insert("counter".to_string(), 0u32).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..250 {
                    let mut guard = map.write();
                    let v = guard.get_mut("counter").expect("counter present");
                    *v += 1;
                }
            });
        }
    });

    assert_eq!(map.get("counter"), Some(1000));
}

// Test: clear and refill from different threads in sequence.
// Assumes: clear holds the write lock for its whole pass.
// Verifies: no stale mapping survives; capacity is retained.
#[test]
fn clear_between_writer_generations() {
    let map = SyncOrderedHashMap::new();
    for n in 0..12u32 {
        map.insert(format!("gen1-{n}"), n).unwrap();
    }
    let capacity = map.capacity();

    thread::scope(|scope| {
        scope
            .spawn(|| {
                map.clear();
                for n in 0..12u32 {
                    map.insert(format!("gen2-{n}"), n).unwrap();
                }
            })
            .join()
            .unwrap();
    });

    assert_eq!(map.len(), 12);
    assert!(!map.contains_key("gen1-0"));
    assert_eq!(map.get("gen2-11"), Some(11));
    assert!(map.capacity() >= capacity);
}

// Test: duplicate errors propagate through the wrapper unchanged.
// Assumes: the wrapper adds locking, not semantics.
// Verifies: same error type as the plain map.
#[test]
fn wrapper_preserves_insert_errors() {
    let map = SyncOrderedHashMap::new();
    map.insert(7u64, "seven").unwrap();
    assert_eq!(map.insert(7u64, "again"), Err(InsertError::DuplicateKey));
    assert_eq!(map.get(&7u64), Some("seven"));
}

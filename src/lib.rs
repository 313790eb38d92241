//! slab-hashmap: An insertion-ordered hash map whose entries live in a
//! slab-backed doubly linked list with stable integer slot addresses.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build OrderedHashMap in safe, verifiable layers so each piece
//!   can be reasoned about independently.
//! - Layers:
//!   - SlotList<T>: a doubly linked list stored in a growable slab of
//!     slots. Elements link to each other by integer `Slot` index, freed
//!     slots are reused by a linear scan, and the slab only ever doubles,
//!     so a `Slot` stays valid until its element is removed.
//!   - OrderedHashMap<K, V, S>: a single-slot bucket table over a
//!     `SlotList<(K, V)>`. Each bucket holds at most one slot; a
//!     collision between different keys grows and rehashes the whole map
//!     instead of probing or chaining.
//!   - SyncOrderedHashMap<K, V, S>: the same map behind a
//!     `parking_lot::RwLock`, for use from multiple threads.
//!
//! Constraints
//! - Iteration order is insertion order, maintained by the list links;
//!   removal splices neighbors and never moves other entries.
//! - `Slot` values returned by `insert`/`push_back` are plain indices
//!   with no generation counter; they are stable for the entry's
//!   lifetime and may be reissued after its removal.
//! - Duplicate inserts fail with `InsertError::DuplicateKey`; updates go
//!   through `get_mut`.
//! - Capacity starts at 1 and only doubles, keeping the bucket table and
//!   the slab the same power-of-two length at all times.
//!
//! Why this split?
//! - Localize invariants: the list knows nothing about hashing; the map
//!   layers ordering-free bucket logic on top and can rebuild its entire
//!   table from the list alone.
//! - The list's raw node iteration plus `position` (recovering a node's
//!   own index from its neighbors' reciprocal links) is exactly the
//!   interface a rehash needs, so growth lives in the map while slot
//!   bookkeeping stays in the list.
//!
//! Growth and rehashing invariants
//! - The map grows when an insert hits a bucket owned by a different
//!   key, or when the slab is one append away from full. Each growth
//!   doubles both sides and re-derives every bucket by walking the list.
//! - Because capacities are powers of two, keys that occupied distinct
//!   buckets before a doubling still occupy distinct buckets after it;
//!   rehashing can only separate keys, never newly collide them.
//! - Hashes are recomputed from `K: Hash` on every access and rehash;
//!   nothing is cached per entry.
//!
//! Concurrency
//! - OrderedHashMap is a plain value: `&mut self` mutators, `Send`/
//!   `Sync` when its parameters are. SyncOrderedHashMap guards the whole
//!   map with one reader-writer lock so a grow-and-rehash is never
//!   observable half done; lock-free readers over a mutating map are not
//!   supported.
//!
//! Notes and non-goals
//! - No free-slot stack: the append path scans for the first free slot,
//!   an O(capacity) cost that keeps reuse dense at the low indices.
//! - No probing and no per-bucket chains; pathological hashers that
//!   collide distinct keys on their full 64-bit hash make the map grow
//!   until the address space is exhausted.
//! - Keys are immutable post-insert; there is no `key_mut`.
//! - Entries are not reference counted and removal is always explicit.

pub mod ordered_hash_map;
pub mod slot_list;
mod slot_list_proptest;
pub mod sync_ordered_hash_map;

// Public surface
pub use ordered_hash_map::{InsertError, OrderedHashMap};
pub use slot_list::{Node, Slot, SlotList};
pub use sync_ordered_hash_map::SyncOrderedHashMap;

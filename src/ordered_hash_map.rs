//! OrderedHashMap: a hash map over [`SlotList`] storage that yields its
//! entries in insertion order.
//!
//! The bucket table maps `hash(key) % capacity` to at most one slot.
//! There is no probing and no chaining: when an insert hashes onto a
//! bucket owned by a different key, the whole map grows and rehashes
//! until the two keys separate. Capacity is always a power of two, which
//! guarantees that rehashing into a doubled table never collides keys
//! that were previously separated.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use std::collections::hash_map::RandomState;

use crate::slot_list::{Slot, SlotList};

/// Error cases for [`OrderedHashMap::insert`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum InsertError {
    /// The key is already present. Existing mappings are never
    /// overwritten; update through [`OrderedHashMap::get_mut`] instead.
    DuplicateKey,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey => write!(f, "key is already present in the map"),
        }
    }
}

impl std::error::Error for InsertError {}

/// A hash map that preserves insertion order.
///
/// Entries live in a [`SlotList`] of `(K, V)` pairs; the hash side is a
/// bucket table of `Option<Slot>` kept at exactly the list's slab
/// length. Lookups are O(1) plus one key comparison. Inserts are O(1)
/// amortized but trigger a full grow-and-rehash on any bucket collision,
/// which also keeps the table sparse.
pub struct OrderedHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Option<Slot>>,
    list: SlotList<(K, V)>,
}

impl<K, V> OrderedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty map with a randomly seeded default hasher.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V> Default for OrderedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OrderedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create an empty map that hashes with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        OrderedHashMap {
            hasher,
            buckets: vec![None],
            list: SlotList::new(),
        }
    }

    fn make_hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hasher.hash_one(key)
    }

    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.make_hash(key) % self.buckets.len() as u64) as usize
    }

    /// Insert a key-value mapping and return the slot it landed in.
    ///
    /// Fails with [`InsertError::DuplicateKey`] if the key is already
    /// present, leaving the map untouched. Otherwise grows the map as
    /// many times as it takes for the key to land in a free bucket with
    /// spare capacity; each round doubles the table, so the retry loop
    /// terminates as soon as the colliding hashes diverge modulo the
    /// table length.
    pub fn insert(&mut self, key: K, value: V) -> Result<Slot, InsertError> {
        loop {
            let bucket = self.bucket_of(&key);
            if let Some(slot) = self.buckets[bucket] {
                let (occupant, _) = self
                    .list
                    .get(slot)
                    .expect("bucket must point at an occupied slot");
                if *occupant == key {
                    return Err(InsertError::DuplicateKey);
                }
                self.grow_and_rehash();
                continue;
            }
            if self.buckets.len() <= self.list.len() + 1 {
                self.grow_and_rehash();
                continue;
            }
            let slot = self.list.push_back((key, value));
            self.buckets[bucket] = Some(slot);
            return Ok(slot);
        }
    }

    // Doubles the slab and the bucket table together, then re-derives
    // every bucket from the list. Distinct residues modulo the old
    // length stay distinct modulo the doubled length, so live keys
    // never collide with each other here.
    fn grow_and_rehash(&mut self) {
        self.list.grow();
        let mut buckets = vec![None; self.list.capacity()];
        for node in self.list.raw_iter() {
            let (key, _) = node.value().expect("raw iteration yields occupied nodes");
            let slot = self.list.position(node);
            let bucket = (self.make_hash(key) % buckets.len() as u64) as usize;
            buckets[bucket] = Some(slot);
        }
        self.buckets = buckets;
    }

    /// Look up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let slot = self.buckets[self.bucket_of(key)]?;
        let (occupant, value) = self.list.get(slot)?;
        if occupant.borrow() == key {
            Some(value)
        } else {
            None
        }
    }

    /// Look up a value by key for in-place mutation. Keys themselves are
    /// immutable once inserted.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let bucket = self.bucket_of(key);
        let slot = self.buckets[bucket]?;
        let entry = self.list.get_mut(slot)?;
        if entry.0.borrow() == key {
            Some(&mut entry.1)
        } else {
            None
        }
    }

    /// Whether the map holds a mapping for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove a key's mapping, preserving the order of the remaining
    /// entries, and return the entry that was stored.
    ///
    /// Returns `None` if the key is absent, including when its bucket
    /// is occupied by a different key, which is left untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let bucket = self.bucket_of(key);
        let slot = self.buckets[bucket]?;
        let (occupant, _) = self
            .list
            .get(slot)
            .expect("bucket must point at an occupied slot");
        if occupant.borrow() != key {
            return None;
        }
        self.buckets[bucket] = None;
        let entry = self
            .list
            .remove(slot)
            .expect("occupied slot must yield its entry on removal");
        Some(entry)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(key, value)| (key, value))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Number of mappings in the map.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True if the map holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Current capacity of the bucket table and the backing slab, which
    /// are always sized in lockstep.
    pub fn capacity(&self) -> usize {
        debug_assert_eq!(self.buckets.len(), self.list.capacity());
        self.buckets.len()
    }

    /// Remove every mapping. Capacity is retained.
    pub fn clear(&mut self) {
        self.list.clear();
        for bucket in &mut self.buckets {
            *bucket = None;
        }
    }
}

impl<K, V, Q, S> Index<&Q> for OrderedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if the key is absent.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> fmt::Debug for OrderedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.list.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

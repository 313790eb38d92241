//! SyncOrderedHashMap: a thread-safe wrapper around [`OrderedHashMap`].
//!
//! All mutation goes through a `parking_lot::RwLock` write lock, so a
//! grow-and-rehash is never observable half done; lookups share a read
//! lock and proceed in parallel. This guards the whole map with one
//! lock rather than locking only the mutators, which would let a reader
//! walk the bucket table mid-rehash.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ordered_hash_map::{InsertError, OrderedHashMap};
use crate::slot_list::Slot;

/// An [`OrderedHashMap`] behind a reader-writer lock.
///
/// Methods lock just long enough for one operation. Iteration and
/// compound read-modify-write sequences go through [`Self::read`] and
/// [`Self::write`], which hand out the guard for the caller to hold.
pub struct SyncOrderedHashMap<K, V, S = RandomState> {
    inner: RwLock<OrderedHashMap<K, V, S>>,
}

impl<K, V> SyncOrderedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty map with a randomly seeded default hasher.
    pub fn new() -> Self {
        SyncOrderedHashMap {
            inner: RwLock::new(OrderedHashMap::new()),
        }
    }
}

impl<K, V> Default for SyncOrderedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> SyncOrderedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create an empty map that hashes with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        SyncOrderedHashMap {
            inner: RwLock::new(OrderedHashMap::with_hasher(hasher)),
        }
    }

    /// Insert a key-value mapping under the write lock.
    pub fn insert(&self, key: K, value: V) -> Result<Slot, InsertError> {
        self.inner.write().insert(key, value)
    }

    /// Remove a key's mapping under the write lock.
    pub fn remove<Q>(&self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// Clone out the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Whether the map holds a mapping for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Snapshot of the values in insertion order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.read().values().cloned().collect()
    }

    /// Number of mappings in the map.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if the map holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Current capacity of the bucket table and backing slab.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Remove every mapping under the write lock. Capacity is retained.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Lock the map for shared access, e.g. to iterate.
    pub fn read(&self) -> RwLockReadGuard<'_, OrderedHashMap<K, V, S>> {
        self.inner.read()
    }

    /// Lock the map for exclusive access, e.g. for check-then-insert
    /// sequences that must not interleave with other writers.
    pub fn write(&self) -> RwLockWriteGuard<'_, OrderedHashMap<K, V, S>> {
        self.inner.write()
    }
}

impl<K, V, S> fmt::Debug for SyncOrderedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), f)
    }
}

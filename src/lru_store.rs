// src/lru_store.rs

//! A capacity-bounded map that evicts its least-recently-used entry.
//!
//! Recency is tracked with a monotonically increasing stamp per access:
//! `entries` maps each key to its value and current stamp, `recency` maps
//! stamps back to keys, so the smallest stamp is always the LRU entry.

// dependencies
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    stamp: u64,
}

/// Bounded key/value store with least-recently-used eviction.
#[derive(Debug)]
pub struct LruStore<K, V> {
    capacity: usize,
    entries: HashMap<K, Slot<V>>,
    recency: BTreeMap<u64, K>,
    next_stamp: u64,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty store. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity.min(1024)),
            recency: BTreeMap::new(),
            next_stamp: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership test that does not count as a use.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Read a value without refreshing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    /// Mutable access that marks the entry as most recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let stamp = self.bump();
        let slot = self.entries.get_mut(key)?;
        if let Some(owner) = self.recency.remove(&slot.stamp) {
            self.recency.insert(stamp, owner);
        }
        slot.stamp = stamp;
        Some(&mut slot.value)
    }

    /// Return the entry for `key`, creating it with `init` if absent.
    ///
    /// The entry becomes the most recently used one. When a new key is
    /// inserted into a full store, the least-recently-used entry is removed
    /// first and handed back alongside the value.
    pub fn get_or_insert_with<F>(&mut self, key: K, init: F) -> (&mut V, Option<(K, V)>)
    where
        F: FnOnce() -> V,
    {
        let evicted = if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };
        let stamp = self.bump();

        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let owner = occupied.key().clone();
                let slot = occupied.into_mut();
                self.recency.remove(&slot.stamp);
                self.recency.insert(stamp, owner);
                slot.stamp = stamp;
                (&mut slot.value, evicted)
            }
            Entry::Vacant(vacant) => {
                self.recency.insert(stamp, vacant.key().clone());
                let slot = vacant.insert(Slot { value: init(), stamp });
                (&mut slot.value, evicted)
            }
        }
    }

    /// Insert or replace a value, returning the entry evicted to make room.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return None;
        }
        let (_, evicted) = self.get_or_insert_with(key, || value);
        evicted
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.recency.remove(&slot.stamp);
        Some(slot.value)
    }

    /// Remove and return the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (_, key) = self.recency.pop_first()?;
        self.entries.remove(&key).map(|slot| (key, slot.value))
    }

    /// Keep only the entries for which `keep` returns true.
    /// Returns the number of entries removed. Recency is not refreshed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let before = self.entries.len();
        let recency = &mut self.recency;
        self.entries.retain(|key, slot| {
            let kept = keep(key, &mut slot.value);
            if !kept {
                recency.remove(&slot.stamp);
            }
            kept
        });
        before - self.entries.len()
    }

    /// Keys ordered from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> {
        self.recency.values()
    }

    fn bump(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}

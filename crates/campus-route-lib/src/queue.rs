//! Min-priority queue with decrease-key support.
//!
//! Entries are ordered by `(priority, insertion sequence)`, so equal priorities
//! come out in FIFO order. A payload index makes re-prioritising an entry
//! O(log n) instead of a linear scan.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EntryKey {
    priority: FloatOrd,
    sequence: u64,
}

/// Priority queue keyed by `f64` priorities over unique payloads.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: BTreeMap<EntryKey, T>,
    index: HashMap<T, EntryKey>,
    next_sequence: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> PriorityQueue<T>
where
    T: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Add `payload` with `priority`.
    ///
    /// A payload that is already queued is moved to the new priority and
    /// counts as freshly inserted.
    pub fn insert(&mut self, priority: f64, payload: T) {
        if let Some(previous) = self.index.remove(&payload) {
            self.entries.remove(&previous);
        }
        let key = EntryKey {
            priority: FloatOrd(priority),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.entries.insert(key, payload);
        self.index.insert(payload, key);
    }

    /// Remove and return the payload with the lowest priority.
    pub fn extract_min(&mut self) -> Result<T> {
        let (_, payload) = self.entries.pop_first().ok_or(Error::EmptyQueue)?;
        self.index.remove(&payload);
        Ok(payload)
    }

    /// Lowest-priority entry without removing it.
    pub fn peek_min(&self) -> Option<(f64, T)> {
        self.entries
            .first_key_value()
            .map(|(key, payload)| (key.priority.0, *payload))
    }

    /// Remove the entry for `payload` and reinsert it with `new_priority`.
    pub fn decrease_priority(&mut self, payload: T, new_priority: f64) -> Result<()> {
        let key = self.index.remove(&payload).ok_or(Error::PayloadNotFound)?;
        self.entries.remove(&key);
        self.insert(new_priority, payload);
        Ok(())
    }

    pub fn contains(&self, payload: &T) -> bool {
        self.index.contains_key(payload)
    }

    pub fn priority_of(&self, payload: &T) -> Option<f64> {
        self.index.get(payload).map(|key| key.priority.0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

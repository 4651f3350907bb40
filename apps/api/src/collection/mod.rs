//! Ordered record collections: one contract, two storage backends.
//!
//! `BoundedCollection` keeps records contiguously up to a fixed capacity.
//! `LinkedCollection` chains records through an index-addressed node arena and
//! grows without limit. Both are observably interchangeable; `Collection<T>`
//! picks one at runtime from configuration.

pub mod bounded;
pub mod linked;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bounded::BoundedCollection;
pub use linked::LinkedCollection;

/// Anything stored in a collection is addressed by a numeric id.
pub trait Record {
    fn id(&self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("collection is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },

    #[error("position {position} is out of range for {size} records")]
    InvalidPosition { position: usize, size: usize },
}

/// The shared collection contract.
///
/// Searches are linear scans where the first match in current order wins.
/// `sort_by` is stable: records with equal keys keep their relative order.
pub trait OrderedCollection<T: Record> {
    fn insert_end(&mut self, record: T) -> Result<(), CollectionError>;

    fn insert_front(&mut self, record: T) -> Result<(), CollectionError>;

    /// Inserts so the record ends up at `position` (0 ..= len).
    /// Out-of-range positions are rejected before anything is touched.
    fn insert_at(&mut self, record: T, position: usize) -> Result<(), CollectionError>;

    fn remove_by_id(&mut self, id: u32) -> bool;

    fn find_by_field<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool;

    fn find_by_id(&self, id: u32) -> Option<&T> {
        self.find_by_field(|record| record.id() == id)
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut T>;

    fn sort_by<K, F>(&mut self, key_fn: F, ascending: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K;

    fn get(&self, index: usize) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` for backends without a fixed limit.
    fn capacity(&self) -> Option<usize>;

    fn clear(&mut self);

    fn for_each_in_order<V>(&self, visitor: V)
    where
        V: FnMut(&T);
}

/// Key comparison honouring sort direction. Equal keys stay `Equal` in both
/// directions so the underlying stable sort keeps their order.
pub(crate) fn compare_keys<K: Ord>(a: &K, b: &K, ascending: bool) -> Ordering {
    if ascending {
        a.cmp(b)
    } else {
        b.cmp(a)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Bounded,
    Linked,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Bounded => f.write_str("bounded"),
            BackendKind::Linked => f.write_str("linked"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown collection backend '{0}' (expected 'bounded' or 'linked')")]
pub struct UnknownBackend(String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" | "array" => Ok(BackendKind::Bounded),
            "linked" | "linkedlist" | "linked_list" => Ok(BackendKind::Linked),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

/// Runtime-selected backend behind the shared contract.
#[derive(Debug, Clone)]
pub enum Collection<T> {
    Bounded(BoundedCollection<T>),
    Linked(LinkedCollection<T>),
}

impl<T> Collection<T> {
    /// `capacity` only applies to the bounded backend.
    pub fn new(kind: BackendKind, capacity: usize) -> Self {
        match kind {
            BackendKind::Bounded => Collection::Bounded(BoundedCollection::with_capacity(capacity)),
            BackendKind::Linked => Collection::Linked(LinkedCollection::new()),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Collection::Bounded(_) => BackendKind::Bounded,
            Collection::Linked(_) => BackendKind::Linked,
        }
    }

    pub fn iter(&self) -> CollectionIter<'_, T> {
        match self {
            Collection::Bounded(c) => CollectionIter::Bounded(c.iter()),
            Collection::Linked(c) => CollectionIter::Linked(c.iter()),
        }
    }
}

impl<T: Record> OrderedCollection<T> for Collection<T> {
    fn insert_end(&mut self, record: T) -> Result<(), CollectionError> {
        match self {
            Collection::Bounded(c) => c.insert_end(record),
            Collection::Linked(c) => c.insert_end(record),
        }
    }

    fn insert_front(&mut self, record: T) -> Result<(), CollectionError> {
        match self {
            Collection::Bounded(c) => c.insert_front(record),
            Collection::Linked(c) => c.insert_front(record),
        }
    }

    fn insert_at(&mut self, record: T, position: usize) -> Result<(), CollectionError> {
        match self {
            Collection::Bounded(c) => c.insert_at(record, position),
            Collection::Linked(c) => c.insert_at(record, position),
        }
    }

    fn remove_by_id(&mut self, id: u32) -> bool {
        match self {
            Collection::Bounded(c) => c.remove_by_id(id),
            Collection::Linked(c) => c.remove_by_id(id),
        }
    }

    fn find_by_field<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        match self {
            Collection::Bounded(c) => c.find_by_field(predicate),
            Collection::Linked(c) => c.find_by_field(predicate),
        }
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut T> {
        match self {
            Collection::Bounded(c) => c.find_by_id_mut(id),
            Collection::Linked(c) => c.find_by_id_mut(id),
        }
    }

    fn sort_by<K, F>(&mut self, key_fn: F, ascending: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        match self {
            Collection::Bounded(c) => c.sort_by(key_fn, ascending),
            Collection::Linked(c) => c.sort_by(key_fn, ascending),
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        match self {
            Collection::Bounded(c) => c.get(index),
            Collection::Linked(c) => c.get(index),
        }
    }

    fn len(&self) -> usize {
        match self {
            Collection::Bounded(c) => c.len(),
            Collection::Linked(c) => c.len(),
        }
    }

    fn capacity(&self) -> Option<usize> {
        match self {
            Collection::Bounded(c) => c.capacity(),
            Collection::Linked(c) => c.capacity(),
        }
    }

    fn clear(&mut self) {
        match self {
            Collection::Bounded(c) => c.clear(),
            Collection::Linked(c) => c.clear(),
        }
    }

    fn for_each_in_order<V>(&self, visitor: V)
    where
        V: FnMut(&T),
    {
        match self {
            Collection::Bounded(c) => c.for_each_in_order(visitor),
            Collection::Linked(c) => c.for_each_in_order(visitor),
        }
    }
}

/// In-order iterator over either backend.
pub enum CollectionIter<'a, T> {
    Bounded(std::slice::Iter<'a, T>),
    Linked(linked::Iter<'a, T>),
}

impl<'a, T> Iterator for CollectionIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            CollectionIter::Bounded(it) => it.next(),
            CollectionIter::Linked(it) => it.next(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = CollectionIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contract tests: every case runs against both backends
// ────────────────────────────────────────────────────────────────────────────

//! Id-keyed containers.
//!
//! `IdMap` keeps insertion order for iteration but compares without regard to
//! order. Entries live behind `Arc`, so deriving one map from another shares
//! every entry that was not replaced: a caller can tell an untouched entry
//! from an equal-but-rebuilt one with [`IdMap::same_entry`].

use crate::id::Id;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::sync::Arc;

/// Set of ids, kept in insertion order
pub type IdSet = IndexSet<Id>;

/// Values that carry their own id, which is also their key in an [`IdMap`]
pub trait WithId {
    fn id(&self) -> &Id;
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdMap<T> {
    entries: IndexMap<Id, Arc<T>>,
}

impl<T> IdMap<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &Id) -> Option<&T> {
        self.entries.get(id).map(|value| value.as_ref())
    }

    /// Shared handle to an entry, for callers that keep it across versions
    pub fn get_arc(&self, id: &Id) -> Option<&Arc<T>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(|value| value.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &T)> {
        self.entries.iter().map(|(id, value)| (id, value.as_ref()))
    }

    pub fn arcs(&self) -> impl Iterator<Item = (&Id, &Arc<T>)> {
        self.entries.iter()
    }

    /// Remove an entry in place, returning it if it was present
    pub fn remove(&mut self, id: &Id) -> Option<Arc<T>> {
        self.entries.shift_remove(id)
    }

    /// Copy of this map without the given ids; absent ids are ignored
    pub fn without<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> Self {
        let mut result = self.clone();
        for id in ids {
            result.entries.shift_remove(id);
        }
        result
    }

    /// Entries whose value satisfies `predicate`, shared with this map
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, value)| predicate(value))
                .map(|(id, value)| (id.clone(), Arc::clone(value)))
                .collect(),
        }
    }

    /// Rebuild every value under the same keys
    pub fn map_values<U>(&self, mut f: impl FnMut(&T) -> U) -> IdMap<U> {
        IdMap {
            entries: self
                .entries
                .iter()
                .map(|(id, value)| (id.clone(), Arc::new(f(value))))
                .collect(),
        }
    }

    /// Like [`map_values`](Self::map_values), but `f` may hand back the
    /// entry it was given to keep it shared
    pub fn map_shared(&self, mut f: impl FnMut(&Arc<T>) -> Arc<T>) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(id, value)| (id.clone(), f(value)))
                .collect(),
        }
    }

    /// Union of both maps; on colliding ids the entry from `other` wins
    pub fn merge(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (id, value) in &other.entries {
            result.entries.insert(id.clone(), Arc::clone(value));
        }
        result
    }

    /// True if both maps hold the very same allocation under `id`
    pub fn same_entry(&self, other: &Self, id: &Id) -> bool {
        match (self.entries.get(id), other.entries.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: WithId> IdMap<T> {
    /// Insert or replace the entry keyed by the value's own id
    pub fn insert(&mut self, value: T) -> Option<Arc<T>> {
        self.insert_arc(Arc::new(value))
    }

    pub fn insert_arc(&mut self, value: Arc<T>) -> Option<Arc<T>> {
        self.entries.insert(value.id().clone(), value)
    }

    /// Persistent counterpart of [`insert`](Self::insert)
    pub fn with(&self, value: T) -> Self {
        let mut result = self.clone();
        result.insert(value);
        result
    }

    /// Ids whose key differs from the id stored in the value
    pub fn mismatched_keys(&self) -> Vec<Id> {
        self.entries
            .iter()
            .filter(|(id, value)| value.id() != *id)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl<T> Clone for IdMap<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> Default for IdMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithId> FromIterator<T> for IdMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl<T: WithId> FromIterator<Arc<T>> for IdMap<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|value| (value.id().clone(), value))
                .collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IdMap<T> {
    type Item = (&'a Id, &'a Arc<T>);
    type IntoIter = indexmap::map::Iter<'a, Id, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> Add for IdMap<T> {
    type Output = IdMap<T>;

    fn add(self, other: IdMap<T>) -> IdMap<T> {
        self.merge(&other)
    }
}

impl<T> Add for &IdMap<T> {
    type Output = IdMap<T>;

    fn add(self, other: &IdMap<T>) -> IdMap<T> {
        self.merge(other)
    }
}

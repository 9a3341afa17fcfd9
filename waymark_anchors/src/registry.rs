// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor storage and metadata inheritance resolution.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::anchor::Anchor;
use crate::meta::MetaTags;

/// Error returned when inserting an anchor whose id is already registered.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DuplicateIdError<K> {
    /// The offending id.
    pub id: K,
}

impl<K: fmt::Debug> fmt::Debug for DuplicateIdError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DuplicateIdError {{ id: {:?} }}", self.id)
    }
}

impl<K: fmt::Debug> fmt::Display for DuplicateIdError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor id {:?} is already registered", self.id)
    }
}

impl<K: fmt::Debug> core::error::Error for DuplicateIdError<K> {}

/// Whether a registry mutation crossed the empty/occupied boundary.
///
/// A coordinator uses these transitions to attach scroll observation when the
/// first anchor arrives and detach it when the last one leaves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occupancy {
    /// The registry went from empty to holding its first anchor.
    BecameOccupied,
    /// The registry went from occupied to empty.
    BecameEmpty,
    /// The mutation did not cross the empty/occupied boundary.
    Unchanged,
}

struct Entry<K, R> {
    anchor: Anchor<K, R>,
    /// Metadata assigned by the last [`AnchorRegistry::resolve_meta`] run for
    /// anchors that have a `hash` but no own metadata. Kept separate from
    /// `anchor.meta` so resolution stays a pure function of registry state.
    resolved_meta: Option<MetaTags>,
}

/// Insertion-ordered anchor storage with unique-id enforcement.
///
/// Lookup by id is constant-time; name lookup returns the first match in
/// insertion order, which is the stable order the inheritance walk and path
/// resolution rely on. Names and hashes need not be unique; ambiguous
/// matches resolve to the earliest-registered anchor.
///
/// # Type Parameters
///
/// - `K`: The anchor key type. Must be `Copy + Eq + Hash`.
/// - `R`: The opaque element handle handed back to the host for measurement.
///
/// # Example
///
/// ```
/// use waymark_anchors::{Anchor, AnchorRegistry, Occupancy};
///
/// let mut registry = AnchorRegistry::<u32, ()>::new();
///
/// assert_eq!(
///     registry.insert(Anchor::new(7, ()).with_name("features")),
///     Ok(Occupancy::BecameOccupied),
/// );
/// assert!(registry.insert(Anchor::new(7, ())).is_err());
///
/// assert_eq!(registry.find_by_name("features").map(|a| a.id), Some(7));
/// assert_eq!(registry.remove(&7), Occupancy::BecameEmpty);
/// assert_eq!(registry.remove(&7), Occupancy::Unchanged);
/// ```
pub struct AnchorRegistry<K, R>
where
    K: Copy + Eq + Hash,
{
    entries: Vec<Entry<K, R>>,
    by_id: HashMap<K, usize>,
}

impl<K, R> Default for AnchorRegistry<K, R>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> AnchorRegistry<K, R>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Returns the number of registered anchors.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no anchors are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an anchor, keyed by its id.
    ///
    /// Returns [`Occupancy::BecameOccupied`] when this is the first anchor,
    /// or an error if the id is already registered.
    pub fn insert(&mut self, anchor: Anchor<K, R>) -> Result<Occupancy, DuplicateIdError<K>> {
        if self.by_id.contains_key(&anchor.id) {
            return Err(DuplicateIdError { id: anchor.id });
        }
        self.by_id.insert(anchor.id, self.entries.len());
        self.entries.push(Entry {
            anchor,
            resolved_meta: None,
        });
        Ok(if self.entries.len() == 1 {
            Occupancy::BecameOccupied
        } else {
            Occupancy::Unchanged
        })
    }

    /// Removes the anchor with the given id.
    ///
    /// Removing an unknown id is a no-op reported as
    /// [`Occupancy::Unchanged`]; removing the last anchor reports
    /// [`Occupancy::BecameEmpty`].
    pub fn remove(&mut self, id: &K) -> Occupancy {
        let Some(index) = self.by_id.remove(id) else {
            return Occupancy::Unchanged;
        };
        self.entries.remove(index);
        for slot in self.by_id.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        if self.entries.is_empty() {
            Occupancy::BecameEmpty
        } else {
            Occupancy::Unchanged
        }
    }

    /// Returns the anchor with the given id.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&Anchor<K, R>> {
        self.by_id.get(id).map(|&i| &self.entries[i].anchor)
    }

    /// Returns the first anchor, in insertion order, with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Anchor<K, R>> {
        self.entries
            .iter()
            .map(|e| &e.anchor)
            .find(|a| a.name.as_deref() == Some(name))
    }

    /// Returns the first anchor, in insertion order, with the given fragment.
    #[must_use]
    pub fn find_by_hash(&self, hash: &str) -> Option<&Anchor<K, R>> {
        self.entries
            .iter()
            .map(|e| &e.anchor)
            .find(|a| a.hash.as_deref() == Some(hash))
    }

    /// Iterates anchors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Anchor<K, R>> {
        self.entries.iter().map(|e| &e.anchor)
    }

    /// Returns the effective metadata for an anchor: its own metadata if
    /// present, otherwise whatever the last [`Self::resolve_meta`] run
    /// assigned to it.
    #[must_use]
    pub fn effective_meta(&self, id: &K) -> Option<&MetaTags> {
        let entry = self.by_id.get(id).map(|&i| &self.entries[i])?;
        entry.anchor.meta.as_ref().or(entry.resolved_meta.as_ref())
    }

    /// Recomputes effective metadata for every anchor that has a `hash` but
    /// no own metadata.
    ///
    /// The rule, per anchor:
    ///
    /// - `exact`, or no `name` → the page `defaults`.
    /// - named and not exact → the effective metadata of the parent anchor,
    ///   the first *other* anchor in insertion order with the same name.
    ///   Parent resolution is transitive: a parent that itself inherits
    ///   passes its inherited value down.
    /// - no parent found → no effective metadata.
    ///
    /// The result is a pure function of current registry state, so re-running
    /// after every mutation is safe and idempotent. The parent walk is
    /// bounded by the registry size; malformed cyclic name references
    /// therefore terminate, with an unspecified (absent) result.
    pub fn resolve_meta(&mut self, defaults: &MetaTags) {
        for index in 0..self.entries.len() {
            let anchor = &self.entries[index].anchor;
            let resolved = if anchor.hash.is_some() && anchor.meta.is_none() {
                self.inherit_from(index, defaults)
            } else {
                None
            };
            self.entries[index].resolved_meta = resolved;
        }
    }

    /// Walks the parent chain for the anchor at `start`, which is known to
    /// have a `hash` and no own metadata.
    fn inherit_from(&self, start: usize, defaults: &MetaTags) -> Option<MetaTags> {
        let mut index = start;
        for step in 0..self.entries.len() {
            let anchor = &self.entries[index].anchor;
            if step > 0 {
                if let Some(meta) = &anchor.meta {
                    return Some(meta.clone());
                }
                // A parent without a fragment never inherits, so it has
                // nothing to pass down.
                if anchor.hash.is_none() {
                    return None;
                }
            }
            let Some(name) = anchor.name.as_deref() else {
                return Some(defaults.clone());
            };
            if anchor.exact {
                return Some(defaults.clone());
            }
            index = self.position_by_name_excluding(name, index)?;
        }
        None
    }

    /// First entry index, in insertion order, whose name matches and which is
    /// not the entry at `exclude`.
    fn position_by_name_excluding(&self, name: &str, exclude: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .find(|(i, e)| *i != exclude && e.anchor.name.as_deref() == Some(name))
            .map(|(i, _)| i)
    }
}

impl<K, R> fmt::Debug for AnchorRegistry<K, R>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorRegistry")
            .field("count", &self.entries.len())
            .field(
                "ids",
                &self.entries.iter().map(|e| e.anchor.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

//! The chained configuration store and its lookup algorithms.
//!
//! [`ConfigStore`] keeps its own entries in a [`HashMap`] keyed by
//! [`KeyId`] and optionally borrows a parent store. Every read walks the
//! chain through [`Ancestors`], starting at the store itself.
//!
//! # Invariants
//!
//! - Each id maps to at most one entry per store, holding the declared type
//!   of the key that wrote it.
//! - Reads never mutate any store in the chain.
//! - Writes (`set`, `erase`, `clear`) touch the receiving store only.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use protocfg_types::{ErasedValue, KeyId, KeyTag};

use crate::error::{StoreError, StoreResult};

/// Typed configuration map that inherits unset keys from a parent store.
///
/// The parent is a shared borrow: a child can never outlive its parent and
/// the parent cannot be mutated while children borrow it. Cloning copies
/// the own entries (capsules share their contents) and keeps the same parent.
#[derive(Clone, Default)]
pub struct ConfigStore<'p> {
    /// Entries set on this store, keyed by id.
    entries: HashMap<KeyId, ErasedValue>,
    /// Store consulted when a key is absent here.
    parent: Option<&'p ConfigStore<'p>>,
}

impl<'p> ConfigStore<'p> {
    /// Create an empty root store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that inherits from `parent`.
    pub fn with_parent(parent: &'p ConfigStore<'p>) -> Self {
        Self {
            entries: HashMap::new(),
            parent: Some(parent),
        }
    }

    // ---------------------------------------------------------------
    // Parent chain
    // ---------------------------------------------------------------

    /// The store this one inherits from, if any.
    pub fn parent(&self) -> Option<&'p ConfigStore<'p>> {
        self.parent
    }

    /// Rebind (or detach) the parent. Takes effect on the next lookup.
    pub fn set_parent(&mut self, parent: Option<&'p ConfigStore<'p>>) {
        debug!(attached = parent.is_some(), "rebound config parent");
        self.parent = parent;
    }

    /// Iterate the chain from this store up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Number of stores in the chain, this one included.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Insert or overwrite the value for `K` on this store.
    ///
    /// The parent is never touched; a value set here shadows any inherited one.
    pub fn set<K: KeyTag>(&mut self, value: impl Into<K::Value>) {
        let replaced = self
            .entries
            .insert(K::ID, ErasedValue::new::<K::Value>(value.into()))
            .is_some();
        debug!(key = K::NAME, id = %K::ID, replaced, "set config value");
    }

    /// Remove `K` from this store only. Returns whether an entry was removed.
    ///
    /// An inherited value for `K` stays visible after erasing a local one.
    pub fn erase<K: KeyTag>(&mut self) -> bool {
        let removed = self.entries.remove(&K::ID).is_some();
        if removed {
            debug!(key = K::NAME, id = %K::ID, "erased config value");
        }
        removed
    }

    /// Remove every entry of this store. The parent keeps its entries.
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "cleared config store");
        self.entries.clear();
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Resolve `K` through the chain and return an owned copy of its value.
    ///
    /// Fails with [`StoreError::KeyNotFound`] when no store in the chain has
    /// the key, and with [`StoreError::Cast`] when the nearest entry under
    /// `K`'s id holds another type.
    pub fn get<K: KeyTag>(&self) -> StoreResult<K::Value> {
        for (depth, store) in self.ancestors().enumerate() {
            if let Some(value) = store.entries.get(&K::ID) {
                trace!(key = K::NAME, id = %K::ID, depth, "resolved config key");
                return value.recover::<K::Value>().map_err(|source| StoreError::Cast {
                    id: K::ID,
                    name: K::NAME,
                    source,
                });
            }
        }
        Err(StoreError::KeyNotFound {
            id: K::ID,
            name: K::NAME,
        })
    }

    /// Whether `K` is set anywhere in the chain.
    pub fn has_key<K: KeyTag>(&self) -> bool {
        self.contains::<K>(true)
    }

    /// Whether `K` is set on this store itself.
    pub fn has_own_key<K: KeyTag>(&self) -> bool {
        self.contains::<K>(false)
    }

    /// Whether `K` is set on this store, or anywhere in the chain if `recurse`.
    pub fn contains<K: KeyTag>(&self, recurse: bool) -> bool {
        if recurse {
            self.ancestors()
                .any(|store| store.entries.contains_key(&K::ID))
        } else {
            self.entries.contains_key(&K::ID)
        }
    }

    /// Ids set anywhere in the chain. Order is unspecified.
    pub fn keys(&self) -> HashSet<KeyId> {
        let mut keys = HashSet::new();
        for store in self.ancestors() {
            keys.extend(store.entries.keys().copied());
        }
        keys
    }

    /// Ids set on this store itself.
    pub fn own_keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of entries on this store, ignoring the parent.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this store has no entries of its own.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ---------------------------------------------------------------
    // Comparison
    // ---------------------------------------------------------------

    /// Whether both stores set the same ids on themselves.
    ///
    /// Values and parents are not compared: two stores that set the same
    /// key to different values are equal.
    pub fn equals(&self, other: &ConfigStore<'_>) -> bool {
        if std::ptr::addr_eq(self, other) {
            return true;
        }
        self.entries.len() == other.entries.len()
            && self
                .entries
                .keys()
                .all(|id| other.entries.contains_key(id))
    }
}

impl<'b> PartialEq<ConfigStore<'b>> for ConfigStore<'_> {
    fn eq(&self, other: &ConfigStore<'b>) -> bool {
        self.equals(other)
    }
}

impl Eq for ConfigStore<'_> {}

impl fmt::Debug for ConfigStore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: BTreeMap<KeyId, &str> = self
            .entries
            .iter()
            .map(|(id, value)| (*id, value.type_name()))
            .collect();
        f.debug_struct("ConfigStore")
            .field("entries", &entries)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Iterator over a store and its ancestors, nearest first.
///
/// Returned by [`ConfigStore::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    next: Option<&'a ConfigStore<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ConfigStore<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

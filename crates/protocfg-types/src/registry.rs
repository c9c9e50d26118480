//! Startup registry of declared keys.
//!
//! Key ids are unique by convention only. [`KeyRegistry`] lets an
//! application record every key it uses once, at startup, and fail fast when
//! two declarations share an id instead of discovering the collision later
//! as a cast error on some lookup.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::TypeError;
use crate::key::{KeyDescriptor, KeyId, KeyTag};

/// Set of declared keys, indexed by id.
#[derive(Clone, Debug, Default)]
pub struct KeyRegistry {
    keys: BTreeMap<KeyId, KeyDescriptor>,
}

impl KeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key `K`.
    ///
    /// Returns `Ok(true)` on first registration and `Ok(false)` when the same
    /// key was already recorded. Fails if a different key holds the id.
    pub fn register<K: KeyTag>(&mut self) -> Result<bool, TypeError> {
        self.register_descriptor(K::descriptor())
    }

    /// Record a key from its runtime descriptor.
    pub fn register_descriptor(&mut self, descriptor: KeyDescriptor) -> Result<bool, TypeError> {
        match self.keys.entry(descriptor.id) {
            Entry::Occupied(slot) => {
                let existing = slot.get();
                if *existing == descriptor {
                    return Ok(false);
                }
                Err(TypeError::DuplicateKeyId {
                    id: descriptor.id,
                    existing: existing.name,
                    existing_type: existing.type_name,
                    incoming: descriptor.name,
                    incoming_type: descriptor.type_name,
                })
            }
            Entry::Vacant(slot) => {
                debug!(
                    id = %descriptor.id,
                    name = descriptor.name,
                    ty = descriptor.type_name,
                    "registered config key"
                );
                slot.insert(descriptor);
                Ok(true)
            }
        }
    }

    /// Descriptor registered under `id`.
    pub fn get(&self, id: KeyId) -> Option<&KeyDescriptor> {
        self.keys.get(&id)
    }

    /// Name of the key registered under `id`.
    pub fn name_of(&self, id: KeyId) -> Option<&'static str> {
        self.keys.get(&id).map(|d| d.name)
    }

    /// Whether `K` itself (not merely its id) is registered.
    pub fn contains<K: KeyTag>(&self) -> bool {
        self.keys.get(&K::ID) == Some(&K::descriptor())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All registered descriptors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.keys.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::config_keys! {
        Year: i32 = 1;
        Make: String = 2;
        Model: String = 3;
        // Collides with Make on purpose.
        Trim: String = 2;
        // Same id and type as Year but a different name.
        ModelYear: i32 = 1;
    }

    #[test]
    fn register_new_keys() {
        let mut registry = KeyRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register::<Year>().unwrap());
        assert!(registry.register::<Make>().unwrap());
        assert!(registry.register::<Model>().unwrap());

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.name_of(KeyId::new(2)), Some("Make"));
        assert!(registry.contains::<Model>());
    }

    #[test]
    fn re_registering_same_key_is_noop() {
        let mut registry = KeyRegistry::new();
        assert!(registry.register::<Year>().unwrap());
        assert!(!registry.register::<Year>().unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn colliding_id_is_rejected() {
        let mut registry = KeyRegistry::new();
        registry.register::<Make>().unwrap();

        let err = registry.register::<Trim>().unwrap_err();
        match err {
            TypeError::DuplicateKeyId {
                id,
                existing,
                incoming,
                ..
            } => {
                assert_eq!(id, KeyId::new(2));
                assert_eq!(existing, "Make");
                assert_eq!(incoming, "Trim");
            }
            other => panic!("expected DuplicateKeyId, got: {other}"),
        }

        // The first registration survives.
        assert_eq!(registry.name_of(KeyId::new(2)), Some("Make"));
        assert!(!registry.contains::<Trim>());
    }

    #[test]
    fn collision_with_same_value_type_is_still_rejected() {
        let mut registry = KeyRegistry::new();
        registry.register::<Year>().unwrap();
        assert!(matches!(
            registry.register::<ModelYear>(),
            Err(TypeError::DuplicateKeyId { .. })
        ));
    }

    #[test]
    fn iter_is_ordered_by_id() {
        let mut registry = KeyRegistry::new();
        registry.register::<Model>().unwrap();
        registry.register::<Year>().unwrap();
        registry.register::<Make>().unwrap();

        let names: Vec<_> = registry.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Year", "Make", "Model"]);
    }

    #[test]
    fn unknown_id_has_no_name() {
        let registry = KeyRegistry::new();
        assert!(registry.get(KeyId::new(99)).is_none());
        assert_eq!(registry.name_of(KeyId::new(99)), None);
    }
}

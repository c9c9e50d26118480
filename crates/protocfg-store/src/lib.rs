//! Prototype-chained configuration store.
//!
//! A [`ConfigStore`] maps typed keys to values and may borrow a parent
//! store. Lookups that miss locally fall through to the parent, then to its
//! parent, and so on; nothing is copied out of the parent. A child overrides
//! an inherited value simply by setting the key itself.
//!
//! ```
//! use protocfg_store::ConfigStore;
//! use protocfg_types::config_keys;
//!
//! config_keys! {
//!     pub Year: i32 = 1;
//!     pub Make: String = 2;
//!     pub Model: String = 3;
//! }
//!
//! let mut company = ConfigStore::new();
//! company.set::<Make>("VW");
//!
//! let mut jetta = ConfigStore::with_parent(&company);
//! jetta.set::<Model>("Jetta GLI");
//! jetta.set::<Year>(2013);
//!
//! assert_eq!(jetta.get::<Make>().unwrap(), "VW");
//! assert!(!company.has_key::<Model>());
//! ```
//!
//! # Design Rules
//!
//! 1. Only the store's own map is ever mutated; parents are borrowed shared.
//! 2. Resolved values are never cached, so rebinding a parent or mutating an
//!    ancestor is visible on the next lookup.
//! 3. Chains are acyclic; shared borrows make a cycle unconstructible.
//! 4. Equality compares own key sets only, never values.

pub mod error;
pub mod store;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use store::{Ancestors, ConfigStore};

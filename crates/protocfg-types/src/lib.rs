//! Foundation types for protocfg.
//!
//! This crate provides the typed keys and the type-erased value capsule that
//! the prototype-chained `ConfigStore` of `protocfg-store` is built on.
//! Every other protocfg crate depends on `protocfg-types`.
//!
//! # Key Types
//!
//! - [`KeyId`] — Program-wide integer identifier of a configuration field
//! - [`KeyTag`] — Compile-time descriptor pairing a [`KeyId`] with a value type
//! - [`KeyDescriptor`] — Runtime description of a [`KeyTag`]
//! - [`KeyRegistry`] — Startup check that rejects colliding key ids
//! - [`ErasedValue`] — Capsule holding one value of any type, with checked recovery
//!
//! Keys are normally declared with [`config_keys!`]:
//!
//! ```
//! use protocfg_types::{config_keys, KeyTag};
//!
//! config_keys! {
//!     pub Year: i32 = 1;
//!     pub Make: String = 2;
//! }
//!
//! assert_eq!(Make::ID.get(), 2);
//! assert_eq!(Year::NAME, "Year");
//! ```

pub mod error;
pub mod key;
pub mod registry;
pub mod value;

pub use error::TypeError;
pub use key::{KeyDescriptor, KeyId, KeyTag};
pub use registry::KeyRegistry;
pub use value::ErasedValue;

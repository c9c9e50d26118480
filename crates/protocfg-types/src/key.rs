//! Typed configuration keys.
//!
//! A key is a zero-sized type implementing [`KeyTag`]: it names one logical
//! configuration field, fixes the field's integer [`KeyId`], and fixes the
//! Rust type stored under it. Stores are generic over the tag, so the value
//! type is checked at every call site and the capsule's runtime check only
//! has to catch id collisions between two tags.

use std::any::{type_name, TypeId};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Program-wide identifier of a configuration field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(i32);

impl KeyId {
    /// Wrap a raw id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw integer id.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for KeyId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compile-time descriptor of a configuration field.
///
/// Ids must be unique across every tag in the program. Nothing in the store
/// enforces this; two tags sharing an id with different value types surface
/// as a cast error on lookup. Use [`KeyRegistry`](crate::KeyRegistry) at
/// startup to reject collisions early.
pub trait KeyTag: 'static {
    /// Type of the value stored under this key.
    type Value: Clone + Send + Sync + 'static;

    /// Unique id of this key.
    const ID: KeyId;

    /// Human-readable key name, used in errors and logs.
    const NAME: &'static str;

    /// Runtime description of this key.
    fn descriptor() -> KeyDescriptor
    where
        Self: Sized,
    {
        KeyDescriptor::of::<Self>()
    }
}

/// Runtime description of a [`KeyTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub id: KeyId,
    pub name: &'static str,
    pub value_type: TypeId,
    pub type_name: &'static str,
}

impl KeyDescriptor {
    /// Describe the key `K`.
    pub fn of<K: KeyTag>() -> Self {
        Self {
            id: K::ID,
            name: K::NAME,
            value_type: TypeId::of::<K::Value>(),
            type_name: type_name::<K::Value>(),
        }
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}: {}", self.name, self.id, self.type_name)
    }
}

/// Declare one or more configuration keys.
///
/// Each `Name: Type = id;` line expands to a unit struct `Name` implementing
/// [`KeyTag`] with `Value = Type` and `ID = KeyId::new(id)`. Doc comments,
/// attributes and visibility are forwarded to the struct.
///
/// ```
/// use protocfg_types::{config_keys, KeyTag};
///
/// config_keys! {
///     /// Minimum accepted reading.
///     pub Min: f64 = 3;
///     Label: String = 4;
/// }
///
/// assert_eq!(Min::NAME, "Min");
/// assert_eq!(Label::ID.get(), 4);
/// ```
#[macro_export]
macro_rules! config_keys {
    ($( $(#[$meta:meta])* $vis:vis $name:ident : $ty:ty = $id:expr ; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name;

            impl $crate::KeyTag for $name {
                type Value = $ty;
                const ID: $crate::KeyId = $crate::KeyId::new($id);
                const NAME: &'static str = stringify!($name);
            }
        )*
    };
}

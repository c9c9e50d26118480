//! Type-erased value capsule.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::TypeError;

/// Holds exactly one value of any `Send + Sync` type.
///
/// The static type is erased but the capsule keeps the value's [`TypeId`],
/// so recovery is checked and fails with [`TypeError::CastMismatch`] instead
/// of reinterpreting memory. Cloning a capsule shares the contained value;
/// the value is never mutated after construction.
#[derive(Clone)]
pub struct ErasedValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ErasedValue {
    /// Capture `value` together with its type identity.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Borrow the contents as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, TypeError> {
        self.value
            .downcast_ref::<T>()
            .ok_or(TypeError::CastMismatch {
                stored: self.type_name,
                requested: type_name::<T>(),
            })
    }

    /// Copy the contents out as `T`.
    pub fn recover<T: Any + Clone>(&self) -> Result<T, TypeError> {
        self.downcast_ref::<T>().cloned()
    }

    /// Whether the capsule holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Type identity of the contained value.
    pub fn value_type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    /// Type name of the contained value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErasedValue<{}>", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recover_matching_type() {
        let capsule = ErasedValue::new(String::from("Jetta GLI"));
        assert_eq!(capsule.recover::<String>().unwrap(), "Jetta GLI");
        assert!(capsule.is::<String>());
    }

    #[test]
    fn recover_wrong_type_fails() {
        let capsule = ErasedValue::new(2013_i32);
        let err = capsule.recover::<String>().unwrap_err();
        assert_eq!(
            err,
            TypeError::CastMismatch {
                stored: "i32",
                requested: type_name::<String>(),
            }
        );
        assert!(!capsule.is::<i64>());
    }

    #[test]
    fn recovered_value_is_a_copy() {
        let capsule = ErasedValue::new(vec![1, 2, 3]);
        let mut out = capsule.recover::<Vec<i32>>().unwrap();
        out.push(4);
        assert_eq!(capsule.downcast_ref::<Vec<i32>>().unwrap(), &vec![1, 2, 3]);
    }

    #[test]
    fn clone_shares_contents() {
        let capsule = ErasedValue::new(10.0_f64);
        let copy = capsule.clone();
        assert_eq!(copy.recover::<f64>().unwrap(), 10.0);
        assert_eq!(copy.value_type_id(), TypeId::of::<f64>());
        assert_eq!(copy.type_name(), "f64");
    }

    #[test]
    fn debug_shows_type_name() {
        let capsule = ErasedValue::new(7_u8);
        assert_eq!(format!("{capsule:?}"), "ErasedValue<u8>");
    }

    proptest! {
        #[test]
        fn string_contents_survive_erasure(s in ".*") {
            let capsule = ErasedValue::new(s.clone());
            prop_assert_eq!(capsule.recover::<String>().unwrap(), s);
        }

        #[test]
        fn integers_never_recover_as_floats(n in any::<i32>()) {
            let capsule = ErasedValue::new(n);
            prop_assert!(capsule.recover::<f64>().is_err());
            prop_assert_eq!(capsule.recover::<i32>().unwrap(), n);
        }
    }
}

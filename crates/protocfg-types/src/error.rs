use thiserror::Error;

use crate::key::KeyId;

/// Errors produced by key and capsule operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A capsule was asked for a type other than the one it holds.
    #[error("cast error: capsule holds {stored}, requested {requested}")]
    CastMismatch {
        stored: &'static str,
        requested: &'static str,
    },

    /// Two different key declarations share the same id.
    #[error(
        "duplicate key id {id}: {existing} ({existing_type}) conflicts with {incoming} ({incoming_type})"
    )]
    DuplicateKeyId {
        id: KeyId,
        existing: &'static str,
        existing_type: &'static str,
        incoming: &'static str,
        incoming_type: &'static str,
    },
}

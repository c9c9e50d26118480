use protocfg_types::{KeyId, TypeError};

/// Errors from config store lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No store in the chain holds the key. Check with `has_key` first.
    #[error("key {name} (id {id}) does not exist in config chain")]
    KeyNotFound { id: KeyId, name: &'static str },

    /// The entry under this id holds a different type than the key declares.
    /// Two key declarations share the id.
    #[error("key {name} (id {id}): {source}")]
    Cast {
        id: KeyId,
        name: &'static str,
        #[source]
        source: TypeError,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

use crate::resource::ResourceKind;

/// A record field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A field value is missing, blank, too long, or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors produced by [`crate::ResourceStore`] operations.
///
/// A failed operation never leaves the store partially modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The operation referenced an identifier that does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: i64 },

    /// A create (or username change) collided with an existing record.
    #[error("{kind} with {key} already exists")]
    DuplicateIdentifier { kind: ResourceKind, key: String },

    /// A record references another record that does not exist.
    #[error("{kind} {field} refers to missing {target} {id}")]
    ReferentialFailure {
        kind: ResourceKind,
        field: &'static str,
        target: ResourceKind,
        id: i64,
    },

    /// A record field failed validation.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// No further id can be assigned because the sequence reached `i64::MAX`.
    #[error("{kind} id sequence exhausted")]
    IdSequenceExhausted { kind: ResourceKind },

    /// A snapshot could not be turned back into a consistent store.
    #[error("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}

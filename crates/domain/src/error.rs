//! Domain error types.

use snapshot_store::SnapshotStoreError;
use thiserror::Error;

use crate::aggregate::InvariantViolation;
use crate::guest_list::GuestListError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The guest list rejected the operation.
    #[error("Guest list error: {0}")]
    GuestList(#[from] GuestListError),

    /// The snapshot store failed to load or save.
    #[error("Failed to {operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: SnapshotStoreError,
    },

    /// A stored snapshot does not satisfy the aggregate's invariants.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(#[from] InvariantViolation),

    /// A command produced a state that breaks the aggregate's invariants.
    /// Nothing was saved.
    #[error("{operation} would break an invariant: {source}")]
    InvariantBroken {
        operation: &'static str,
        #[source]
        source: InvariantViolation,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Returns the guest list rejection, if this is one.
    pub fn rejection(&self) -> Option<&GuestListError> {
        match self {
            DomainError::GuestList(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if another writer saved first.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Persistence { source, .. } if source.is_conflict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest_list::ValidationError;
    use snapshot_store::Version;

    #[test]
    fn test_rejection() {
        let err = DomainError::from(GuestListError::from(ValidationError::EmptyGuestName));
        assert!(err.rejection().is_some());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_persistence_conflict() {
        let err = DomainError::Persistence {
            operation: "add guest",
            source: SnapshotStoreError::ConcurrencyConflict {
                expected: Version::new(1),
                actual: Version::new(2),
            },
        };

        assert!(err.is_conflict());
        assert!(err.rejection().is_none());
        assert!(err.to_string().starts_with("Failed to add guest: "));
    }
}

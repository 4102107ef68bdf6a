//! Core aggregate trait.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// A consistency rule that a loaded or computed aggregate state breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violated: {0}")]
pub struct InvariantViolation(String);

impl InvariantViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Trait for snapshot-persisted aggregates.
///
/// An aggregate is a cluster of domain objects that is loaded, changed and
/// saved as a single unit. Here the whole aggregate is the persisted state:
/// commands are pure functions from the current value to the next one, and
/// the command handler stores the result as a new snapshot.
pub trait Aggregate:
    Default + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    /// The type of errors this aggregate's commands can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    ///
    /// Used in logs and error messages.
    fn aggregate_type() -> &'static str;

    /// Checks the cross-record consistency rules of the aggregate.
    ///
    /// Every value produced by a command must pass. Snapshots that fail are
    /// treated as corrupt.
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        Ok(())
    }
}

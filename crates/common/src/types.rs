use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a guest.
///
/// Opaque to the domain: generated ids are UUID v4 strings, but any string
/// handed in by a caller (or loaded from a snapshot) is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Creates a new random guest ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GuestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GuestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Uuid> for GuestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl AsRef<str> for GuestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a household.
///
/// Household ids are positive and assigned sequentially by the guest list,
/// starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HouseholdId(u32);

impl HouseholdId {
    /// Creates a household ID from a raw value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the first household ID (1).
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next household ID.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the raw value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the ID is a valid (positive) household ID.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HouseholdId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<HouseholdId> for u32 {
    fn from(id: HouseholdId) -> Self {
        id.0
    }
}

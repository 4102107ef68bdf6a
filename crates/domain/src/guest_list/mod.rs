//! Guest list aggregate and related types.

mod aggregate;
mod code;
mod commands;
mod guest;
mod household;
mod service;

pub use aggregate::GuestList;
pub use code::{CODE_OFFSET, HouseholdCode, household_code};
pub use commands::*;
pub use guest::{Guest, GuestUpdate, NewGuest};
pub use household::Household;
pub use service::GuestListService;

use common::{GuestId, HouseholdId};
use thiserror::Error;

/// How a household was looked up when it could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseholdLookup {
    Id(HouseholdId),
    Code(String),
}

impl std::fmt::Display for HouseholdLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HouseholdLookup::Id(id) => write!(f, "id {id}"),
            HouseholdLookup::Code(code) => write!(f, "code {code}"),
        }
    }
}

/// Shape errors in guest or household input, independent of any list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Guest name is empty or whitespace.
    #[error("Guest name must not be empty")]
    EmptyGuestName,

    /// Household ids start at 1.
    #[error("Invalid household id: {id} (must be greater than 0)")]
    InvalidHouseholdId { id: HouseholdId },

    /// Household code is not base62, or not the code derived from the id.
    #[error("Invalid household code: '{code}'")]
    InvalidHouseholdCode { code: String },

    /// The same guest appears more than once in one RSVP.
    #[error("Guest {id} appears more than once in the RSVP")]
    DuplicateGuestUpdate { id: GuestId },
}

impl ValidationError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyGuestName => "EMPTY_GUEST_NAME",
            ValidationError::InvalidHouseholdId { .. } => "INVALID_HOUSEHOLD_ID",
            ValidationError::InvalidHouseholdCode { .. } => "INVALID_HOUSEHOLD_CODE",
            ValidationError::DuplicateGuestUpdate { .. } => "DUPLICATE_GUEST_UPDATE",
        }
    }
}

/// Rejections produced by guest list operations.
///
/// Every variant is an expected outcome of bad or conflicting input. A
/// rejected operation never changes the list it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestListError {
    /// A guest with this id is already on the list.
    #[error("Guest {id} already exists")]
    GuestAlreadyExists { id: GuestId },

    /// Another guest already has this exact name.
    #[error("A guest named '{name}' already exists")]
    GuestWithThatNameAlreadyExists { name: String },

    /// A household with this id is already on the list.
    #[error("Household {id} already exists")]
    HouseholdAlreadyExists { id: HouseholdId },

    /// No guest with this id.
    #[error("Guest not found: {id}")]
    GuestNotFound { id: GuestId },

    /// No household with this id or code.
    #[error("Household not found: {lookup}")]
    HouseholdNotFound { lookup: HouseholdLookup },

    /// The guests in an RSVP are not exactly the household's roster.
    #[error(
        "Guests do not match household {code}: missing [{}], unexpected [{}]",
        join_ids(.missing),
        join_ids(.unexpected)
    )]
    GuestsNotFoundInHousehold {
        code: HouseholdCode,
        missing: Vec<GuestId>,
        unexpected: Vec<GuestId>,
    },

    /// The guest is on another household's roster; moving is a separate operation.
    #[error("Guest {guest_id} already belongs to household {current}")]
    GuestAlreadyInAnotherHousehold {
        guest_id: GuestId,
        current: HouseholdId,
    },

    /// An RSVP update points a guest at a household other than the one RSVPing.
    #[error("Guest {guest_id} names household {given} but belongs to household {expected}")]
    HouseholdMismatch {
        guest_id: GuestId,
        expected: HouseholdId,
        given: HouseholdId,
    },

    /// Malformed input.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl GuestListError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            GuestListError::GuestAlreadyExists { .. } => "GUEST_ALREADY_EXISTS",
            GuestListError::GuestWithThatNameAlreadyExists { .. } => {
                "GUEST_WITH_THAT_NAME_ALREADY_EXISTS"
            }
            GuestListError::HouseholdAlreadyExists { .. } => "HOUSEHOLD_ALREADY_EXISTS",
            GuestListError::GuestNotFound { .. } => "GUEST_NOT_FOUND",
            GuestListError::HouseholdNotFound { .. } => "HOUSEHOLD_NOT_FOUND",
            GuestListError::GuestsNotFoundInHousehold { .. } => "GUESTS_NOT_FOUND_IN_HOUSEHOLD",
            GuestListError::GuestAlreadyInAnotherHousehold { .. } => {
                "GUEST_ALREADY_IN_ANOTHER_HOUSEHOLD"
            }
            GuestListError::HouseholdMismatch { .. } => "HOUSEHOLD_MISMATCH",
            GuestListError::Invalid(err) => err.code(),
        }
    }
}

fn join_ids(ids: &[GuestId]) -> String {
    ids.iter()
        .map(GuestId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_not_found_message_lists_ids() {
        let err = GuestListError::GuestsNotFoundInHousehold {
            code: household_code(HouseholdId::first()),
            missing: vec![GuestId::from("g2")],
            unexpected: vec![GuestId::from("g3"), GuestId::from("g4")],
        };

        assert_eq!(
            err.to_string(),
            "Guests do not match household g9: missing [g2], unexpected [g3, g4]"
        );
    }

    #[test]
    fn invalid_input_keeps_validation_code() {
        let err = GuestListError::from(ValidationError::EmptyGuestName);
        assert_eq!(err.code(), "EMPTY_GUEST_NAME");
        assert_eq!(err.to_string(), "Guest name must not be empty");
    }

    #[test]
    fn household_lookup_display() {
        assert_eq!(HouseholdLookup::Id(HouseholdId::new(2)).to_string(), "id 2");
        assert_eq!(
            HouseholdLookup::Code("g9".to_string()).to_string(),
            "code g9"
        );
    }
}

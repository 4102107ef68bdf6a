//! Guest list commands.

use common::{GuestId, HouseholdId};

use super::{GuestUpdate, NewGuest};

/// Command to create the next household.
///
/// The id and code are assigned by the list.
#[derive(Debug, Clone, Default)]
pub struct CreateHousehold;

/// Command to register a guest.
#[derive(Debug, Clone)]
pub struct AddGuest {
    /// Details of the guest to register.
    pub guest: NewGuest,

    /// Id to register the guest under; generated when None.
    pub guest_id: Option<GuestId>,
}

impl AddGuest {
    /// Creates a new AddGuest command with a generated guest ID.
    pub fn new(guest: NewGuest) -> Self {
        Self {
            guest,
            guest_id: None,
        }
    }

    /// Registers the guest under a caller-chosen ID.
    pub fn with_id(mut self, guest_id: impl Into<GuestId>) -> Self {
        self.guest_id = Some(guest_id.into());
        self
    }
}

/// Command to put a guest who has no household on a household's roster.
#[derive(Debug, Clone)]
pub struct AddGuestToHousehold {
    pub household_id: HouseholdId,
    pub guest_id: GuestId,
}

impl AddGuestToHousehold {
    pub fn new(household_id: HouseholdId, guest_id: impl Into<GuestId>) -> Self {
        Self {
            household_id,
            guest_id: guest_id.into(),
        }
    }
}

/// Command to move a guest to another household.
#[derive(Debug, Clone)]
pub struct MoveGuest {
    pub guest_id: GuestId,
    pub household_id: HouseholdId,
}

impl MoveGuest {
    pub fn new(guest_id: impl Into<GuestId>, household_id: HouseholdId) -> Self {
        Self {
            guest_id: guest_id.into(),
            household_id,
        }
    }
}

/// Command to submit a household's RSVP.
#[derive(Debug, Clone)]
pub struct Rsvp {
    /// Code of the household answering.
    pub household_code: String,

    /// One full update per guest on the household's roster.
    pub guests: Vec<GuestUpdate>,
}

impl Rsvp {
    pub fn new(household_code: impl Into<String>, guests: Vec<GuestUpdate>) -> Self {
        Self {
            household_code: household_code.into(),
            guests,
        }
    }
}

//! Household records.

use common::{GuestId, HouseholdId};
use serde::{Deserialize, Serialize};

use super::{HouseholdCode, ValidationError, household_code};

/// A group of guests that RSVPs together under one shareable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    id: HouseholdId,
    code: HouseholdCode,
    #[serde(default)]
    guests: Vec<GuestId>,
}

impl Household {
    /// Creates a household with an empty roster.
    ///
    /// The id must be positive and the code must be the one derived from it.
    /// Use [`Household::for_id`] to derive the code instead of supplying one.
    pub fn create(id: HouseholdId, code: HouseholdCode) -> Result<Self, ValidationError> {
        if !id.is_valid() {
            return Err(ValidationError::InvalidHouseholdId { id });
        }
        if code != household_code(id) {
            return Err(ValidationError::InvalidHouseholdCode {
                code: code.to_string(),
            });
        }

        Ok(Self {
            id,
            code,
            guests: Vec::new(),
        })
    }

    /// Creates a household whose code is derived from its id.
    pub fn for_id(id: HouseholdId) -> Result<Self, ValidationError> {
        Self::create(id, household_code(id))
    }

    pub fn id(&self) -> HouseholdId {
        self.id
    }

    pub fn code(&self) -> &HouseholdCode {
        &self.code
    }

    /// Ids of the guests on the roster.
    pub fn guests(&self) -> &[GuestId] {
        &self.guests
    }

    pub fn has_guest(&self, guest_id: &GuestId) -> bool {
        self.guests.contains(guest_id)
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    /// Returns a copy with the guest on the roster. Adding a guest that is
    /// already present leaves the roster unchanged.
    pub(crate) fn with_guest(&self, guest_id: &GuestId) -> Self {
        let mut household = self.clone();
        if !household.has_guest(guest_id) {
            household.guests.push(guest_id.clone());
        }
        household
    }

    /// Returns a copy with the guest removed from the roster.
    pub(crate) fn without_guest(&self, guest_id: &GuestId) -> Self {
        Self {
            guests: self
                .guests
                .iter()
                .filter(|id| *id != guest_id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_household_has_empty_roster() {
        let household = Household::for_id(HouseholdId::first()).unwrap();

        assert_eq!(household.id(), HouseholdId::first());
        assert_eq!(household.code().as_str(), "g9");
        assert!(household.guests().is_empty());
    }

    #[test]
    fn create_household_rejects_zero_id() {
        let result = Household::for_id(HouseholdId::new(0));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidHouseholdId { .. })
        ));
    }

    #[test]
    fn create_household_accepts_derived_code() {
        let code = HouseholdCode::parse("gb").unwrap();
        let household = Household::create(HouseholdId::new(3), code.clone()).unwrap();
        assert_eq!(household.code(), &code);
    }

    #[test]
    fn create_household_rejects_code_of_another_id() {
        let result = Household::create(HouseholdId::new(2), household_code(HouseholdId::first()));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidHouseholdCode { ref code }) if code == "g9"
        ));

        let result = Household::create(HouseholdId::new(3), HouseholdCode::parse("abc").unwrap());
        assert!(matches!(
            result,
            Err(ValidationError::InvalidHouseholdCode { .. })
        ));
    }

    #[test]
    fn with_guest_is_idempotent() {
        let guest_id = GuestId::from("alice-id");
        let household = Household::for_id(HouseholdId::first())
            .unwrap()
            .with_guest(&guest_id)
            .with_guest(&guest_id);

        assert_eq!(household.guests(), &[guest_id]);
    }

    #[test]
    fn without_guest_removes_only_that_guest() {
        let alice = GuestId::from("alice-id");
        let bob = GuestId::from("bob-id");
        let household = Household::for_id(HouseholdId::first())
            .unwrap()
            .with_guest(&alice)
            .with_guest(&bob)
            .without_guest(&alice);

        assert_eq!(household.guests(), &[bob]);
        assert!(!household.has_guest(&alice));
    }
}

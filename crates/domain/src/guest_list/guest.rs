//! Guest records.

use common::{GuestId, HouseholdId};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// One invitee.
///
/// Guests are created through [`Guest::create`] and only ever replaced as a
/// whole record inside a [`GuestList`](super::GuestList).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: GuestId,
    name: String,
    email: String,
    dietary_requirements: Option<String>,
    attending: Option<bool>,
    #[serde(default)]
    is_child: bool,
    household: Option<HouseholdId>,
}

/// The fields a caller supplies when registering a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub dietary_requirements: Option<String>,
    pub attending: Option<bool>,
    pub is_child: bool,
}

impl NewGuest {
    /// Creates the minimal set of guest details.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_dietary_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.dietary_requirements = Some(requirements.into());
        self
    }

    pub fn with_attending(mut self, attending: bool) -> Self {
        self.attending = Some(attending);
        self
    }

    pub fn as_child(mut self) -> Self {
        self.is_child = true;
        self
    }
}

/// A full replacement of a guest's fields, submitted during RSVP.
///
/// Every field except `id` overwrites the stored value; `id` only selects
/// which guest is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUpdate {
    pub id: GuestId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dietary_requirements: Option<String>,
    #[serde(default)]
    pub attending: Option<bool>,
    #[serde(default)]
    pub is_child: bool,
    #[serde(default)]
    pub household: Option<HouseholdId>,
}

impl GuestUpdate {
    /// Builds an update that leaves every field of `guest` as it is.
    pub fn from_guest(guest: &Guest) -> Self {
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            email: guest.email.clone(),
            dietary_requirements: guest.dietary_requirements.clone(),
            attending: guest.attending,
            is_child: guest.is_child,
            household: guest.household,
        }
    }

    /// Checks the update describes a well-formed guest.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

impl Guest {
    /// Creates a guest, generating an id when none is given.
    ///
    /// Only checks the shape of the guest. Whether the name is free in a
    /// particular list is checked by [`GuestList::add_guest`](super::GuestList::add_guest).
    pub fn create(details: NewGuest, id: Option<GuestId>) -> Result<Self, ValidationError> {
        validate_name(&details.name)?;

        Ok(Self {
            id: id.unwrap_or_default(),
            name: details.name,
            email: details.email,
            dietary_requirements: details.dietary_requirements,
            attending: details.attending,
            is_child: details.is_child,
            household: None,
        })
    }

    pub fn id(&self) -> &GuestId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn dietary_requirements(&self) -> Option<&str> {
        self.dietary_requirements.as_deref()
    }

    /// `None` while the guest hasn't answered.
    pub fn attending(&self) -> Option<bool> {
        self.attending
    }

    pub fn is_child(&self) -> bool {
        self.is_child
    }

    pub fn household(&self) -> Option<HouseholdId> {
        self.household
    }

    /// Returns a copy of this guest assigned to a household (or to none).
    pub(crate) fn with_household(&self, household: Option<HouseholdId>) -> Self {
        Self {
            household,
            ..self.clone()
        }
    }

    /// Returns this guest with every field but the id replaced by `update`.
    pub(crate) fn merged(&self, update: &GuestUpdate) -> Self {
        Self {
            id: self.id.clone(),
            name: update.name.clone(),
            email: update.email.clone(),
            dietary_requirements: update.dietary_requirements.clone(),
            attending: update.attending,
            is_child: update.is_child,
            household: update.household,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyGuestName);
    }
    Ok(())
}

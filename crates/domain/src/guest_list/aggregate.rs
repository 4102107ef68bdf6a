//! Guest list aggregate implementation.

use std::collections::{HashMap, HashSet};

use common::{GuestId, HouseholdId};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, InvariantViolation};

use super::{
    Guest, GuestListError, GuestUpdate, Household, HouseholdCode, HouseholdLookup,
    ValidationError, household_code,
};

/// Guest list aggregate root.
///
/// Owns every guest and household of one event. All operations are pure:
/// they take `&self` and return a new list, so a rejected operation leaves
/// the current list untouched and the caller decides when the new value becomes
/// durable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestList {
    #[serde(default)]
    guests: Vec<Guest>,

    #[serde(default)]
    households: Vec<Household>,
}

impl Aggregate for GuestList {
    type Error = GuestListError;

    fn aggregate_type() -> &'static str {
        "GuestList"
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut guest_ids = HashSet::new();
        let mut names = HashSet::new();
        for guest in &self.guests {
            if !guest_ids.insert(guest.id()) {
                return Err(InvariantViolation::new(format!(
                    "duplicate guest id {}",
                    guest.id()
                )));
            }
            if !names.insert(guest.name()) {
                return Err(InvariantViolation::new(format!(
                    "duplicate guest name '{}'",
                    guest.name()
                )));
            }
        }

        let mut household_ids = HashSet::new();
        for household in &self.households {
            if !household_ids.insert(household.id()) {
                return Err(InvariantViolation::new(format!(
                    "duplicate household id {}",
                    household.id()
                )));
            }
            if household.code() != &household_code(household.id()) {
                return Err(InvariantViolation::new(format!(
                    "household {} has code {} instead of {}",
                    household.id(),
                    household.code(),
                    household_code(household.id())
                )));
            }

            let mut roster = HashSet::new();
            for guest_id in household.guests() {
                if !roster.insert(guest_id) {
                    return Err(InvariantViolation::new(format!(
                        "guest {guest_id} listed twice in household {}",
                        household.id()
                    )));
                }
                match self.guest(guest_id) {
                    Some(guest) if guest.household() == Some(household.id()) => {}
                    Some(_) => {
                        return Err(InvariantViolation::new(format!(
                            "guest {guest_id} is on household {}'s roster but not assigned to it",
                            household.id()
                        )));
                    }
                    None => {
                        return Err(InvariantViolation::new(format!(
                            "household {} lists unknown guest {guest_id}",
                            household.id()
                        )));
                    }
                }
            }
        }

        for guest in &self.guests {
            if let Some(household_id) = guest.household() {
                let on_roster = self
                    .household(household_id)
                    .is_some_and(|h| h.has_guest(guest.id()));
                if !on_roster {
                    return Err(InvariantViolation::new(format!(
                        "guest {} is assigned to household {household_id} but not on its roster",
                        guest.id()
                    )));
                }
            }
        }

        Ok(())
    }
}

// Query methods
impl GuestList {
    /// Creates an empty guest list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all guests, in registration order.
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Returns all households, in creation order.
    pub fn households(&self) -> &[Household] {
        &self.households
    }

    /// Returns a guest by id.
    pub fn guest(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id() == id)
    }

    /// Returns a guest by exact name.
    pub fn guest_by_name(&self, name: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.name() == name)
    }

    /// Returns a household by id.
    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.iter().find(|h| h.id() == id)
    }

    /// Returns a household by its shareable code.
    pub fn household_by_code(&self, code: &str) -> Option<&Household> {
        let id = HouseholdCode::parse(code).ok()?.household_id()?;
        self.household(id).filter(|h| h.code().as_str() == code)
    }

    /// Returns the guest records on a household's roster, in roster order.
    pub fn members(&self, household: &Household) -> Vec<&Guest> {
        household
            .guests()
            .iter()
            .filter_map(|id| self.guest(id))
            .collect()
    }

    /// Returns the id the next created household receives.
    ///
    /// Ids are assigned 1, 2, 3, ... so this equals the number of households
    /// plus one.
    pub fn next_household_id(&self) -> HouseholdId {
        self.households
            .iter()
            .map(Household::id)
            .max()
            .map_or(HouseholdId::first(), |id| id.next())
    }
}

// Command methods (return the next list)
impl GuestList {
    /// Creates a household with the next id and its derived code.
    pub fn create_household(&self) -> Result<(Self, Household), GuestListError> {
        let household = Household::for_id(self.next_household_id())?;
        let list = self.add_household(household.clone())?;
        Ok((list, household))
    }

    /// Adds a household.
    ///
    /// The household's code must be the one derived from its id.
    pub fn add_household(&self, household: Household) -> Result<Self, GuestListError> {
        if household.code() != &household_code(household.id()) {
            return Err(ValidationError::InvalidHouseholdCode {
                code: household.code().to_string(),
            }
            .into());
        }
        if self.household(household.id()).is_some() {
            return Err(GuestListError::HouseholdAlreadyExists { id: household.id() });
        }

        let mut list = self.clone();
        list.households.push(household);
        Ok(list)
    }

    /// Registers a guest.
    ///
    /// Names are the uniqueness key: a guest whose name exactly matches an
    /// existing guest's is rejected. Ids must be unique too, since callers may
    /// supply their own.
    pub fn add_guest(&self, guest: Guest) -> Result<Self, GuestListError> {
        if self.guest(guest.id()).is_some() {
            return Err(GuestListError::GuestAlreadyExists {
                id: guest.id().clone(),
            });
        }
        if self.guest_by_name(guest.name()).is_some() {
            return Err(GuestListError::GuestWithThatNameAlreadyExists {
                name: guest.name().to_string(),
            });
        }

        let mut list = self.clone();
        list.guests.push(guest);
        Ok(list)
    }

    /// Puts a guest on a household's roster and points the guest at it.
    ///
    /// Repeating the assignment is a no-op. A guest that already belongs to a
    /// different household is rejected; use
    /// [`move_guest_to_household`](Self::move_guest_to_household) for that.
    pub fn add_guest_to_household(
        &self,
        household_id: HouseholdId,
        guest_id: &GuestId,
    ) -> Result<Self, GuestListError> {
        let guest = self
            .guest(guest_id)
            .ok_or_else(|| GuestListError::GuestNotFound {
                id: guest_id.clone(),
            })?;
        let household = self.find_household(household_id)?;

        if let Some(current) = guest.household()
            && current != household_id
        {
            return Err(GuestListError::GuestAlreadyInAnotherHousehold {
                guest_id: guest_id.clone(),
                current,
            });
        }

        let guest = guest.with_household(Some(household_id));
        let household = household.with_guest(guest_id);
        Ok(self.replace_guest(guest).replace_household(household))
    }

    /// Moves a guest from whichever household they are in to another one.
    ///
    /// Guests without a household are simply assigned.
    pub fn move_guest_to_household(
        &self,
        guest_id: &GuestId,
        household_id: HouseholdId,
    ) -> Result<Self, GuestListError> {
        let guest = self
            .guest(guest_id)
            .ok_or_else(|| GuestListError::GuestNotFound {
                id: guest_id.clone(),
            })?;
        self.find_household(household_id)?;

        let list = match guest.household() {
            Some(current) if current == household_id => return Ok(self.clone()),
            Some(current) => match self.household(current) {
                Some(previous) => self.replace_household(previous.without_guest(guest_id)),
                None => self.clone(),
            },
            None => self.clone(),
        };

        let guest = guest.with_household(None);
        list.replace_guest(guest)
            .add_guest_to_household(household_id, guest_id)
    }

    /// Applies a household's RSVP.
    ///
    /// `updates` must name exactly the guests on the roster of the household
    /// with `code`, each once. Matching guests get every field except their id
    /// replaced by the update; nothing else changes. Any rejection leaves the
    /// list as it was.
    pub fn rsvp(&self, code: &str, updates: &[GuestUpdate]) -> Result<Self, GuestListError> {
        let household =
            self.household_by_code(code)
                .ok_or_else(|| GuestListError::HouseholdNotFound {
                    lookup: HouseholdLookup::Code(code.to_string()),
                })?;

        let mut by_id: HashMap<&GuestId, &GuestUpdate> = HashMap::with_capacity(updates.len());
        for update in updates {
            if by_id.insert(&update.id, update).is_some() {
                return Err(ValidationError::DuplicateGuestUpdate {
                    id: update.id.clone(),
                }
                .into());
            }
        }

        let roster: HashSet<&GuestId> = household.guests().iter().collect();
        if roster.len() != by_id.len() || !roster.iter().all(|id| by_id.contains_key(id)) {
            return Err(GuestListError::GuestsNotFoundInHousehold {
                code: household.code().clone(),
                missing: household
                    .guests()
                    .iter()
                    .filter(|id| !by_id.contains_key(id))
                    .cloned()
                    .collect(),
                unexpected: updates
                    .iter()
                    .filter(|u| !roster.contains(&u.id))
                    .map(|u| u.id.clone())
                    .collect(),
            });
        }

        for update in updates {
            update.validate()?;
            if let Some(given) = update.household
                && given != household.id()
            {
                return Err(GuestListError::HouseholdMismatch {
                    guest_id: update.id.clone(),
                    expected: household.id(),
                    given,
                });
            }
        }

        let guests: Vec<Guest> = self
            .guests
            .iter()
            .map(|guest| match by_id.get(guest.id()) {
                Some(update) => guest
                    .merged(update)
                    .with_household(Some(household.id())),
                None => guest.clone(),
            })
            .collect();

        let mut names = HashSet::with_capacity(guests.len());
        for guest in &guests {
            if !names.insert(guest.name()) {
                return Err(GuestListError::GuestWithThatNameAlreadyExists {
                    name: guest.name().to_string(),
                });
            }
        }

        Ok(Self {
            guests,
            households: self.households.clone(),
        })
    }
}

// Record replacement helpers
impl GuestList {
    fn find_household(&self, id: HouseholdId) -> Result<&Household, GuestListError> {
        self.household(id)
            .ok_or(GuestListError::HouseholdNotFound {
                lookup: HouseholdLookup::Id(id),
            })
    }

    fn replace_guest(&self, guest: Guest) -> Self {
        Self {
            guests: self
                .guests
                .iter()
                .map(|g| if g.id() == guest.id() { guest.clone() } else { g.clone() })
                .collect(),
            households: self.households.clone(),
        }
    }

    fn replace_household(&self, household: Household) -> Self {
        Self {
            guests: self.guests.clone(),
            households: self
                .households
                .iter()
                .map(|h| {
                    if h.id() == household.id() {
                        household.clone()
                    } else {
                        h.clone()
                    }
                })
                .collect(),
        }
    }
}

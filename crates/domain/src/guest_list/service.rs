//! Guest list service providing the use cases over a snapshot store.

use common::{GuestId, HouseholdId};
use snapshot_store::SnapshotStore;
use tokio::sync::Mutex;

use crate::command::CommandHandler;
use crate::error::DomainError;

use super::{
    AddGuest, AddGuestToHousehold, CreateHousehold, Guest, GuestList, GuestListError, Household,
    HouseholdLookup, MoveGuest, Rsvp,
};

/// Service for managing a guest list.
///
/// Wraps the command handler and serialises writers within the process, so
/// two requests never interleave their load, apply and save steps. Writers in
/// other processes are caught by the store's version check instead.
pub struct GuestListService<S: SnapshotStore> {
    handler: CommandHandler<S, GuestList>,
    writer: Mutex<()>,
}

impl<S: SnapshotStore> GuestListService<S> {
    /// Creates a new guest list service with the given snapshot store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
            writer: Mutex::new(()),
        }
    }

    /// Creates the next household.
    #[tracing::instrument(skip(self))]
    pub async fn create_household(&self, _cmd: CreateHousehold) -> Result<Household, DomainError> {
        let _guard = self.writer.lock().await;

        let result = self
            .handler
            .execute("create household", |list| list.create_household())
            .await
            .map(|r| r.output);

        if let Ok(household) = &result {
            tracing::info!(household_id = %household.id(), code = %household.code(), "household created");
        }
        record("create_household", result)
    }

    /// Registers a guest.
    #[tracing::instrument(skip(self))]
    pub async fn add_guest(&self, cmd: AddGuest) -> Result<Guest, DomainError> {
        let _guard = self.writer.lock().await;

        let guest = Guest::create(cmd.guest, cmd.guest_id).map_err(GuestListError::from);
        let result = match guest {
            Ok(guest) => self
                .handler
                .execute("add guest", |list| {
                    let next = list.add_guest(guest.clone())?;
                    Ok((next, guest))
                })
                .await
                .map(|r| r.output),
            Err(err) => Err(err.into()),
        };

        if let Ok(guest) = &result {
            tracing::info!(guest_id = %guest.id(), "guest added");
        }
        record("add_guest", result)
    }

    /// Puts a guest on a household's roster.
    #[tracing::instrument(skip(self))]
    pub async fn add_guest_to_household(
        &self,
        cmd: AddGuestToHousehold,
    ) -> Result<Household, DomainError> {
        let _guard = self.writer.lock().await;
        let household_id = cmd.household_id;
        let guest_id = cmd.guest_id;

        let result = self
            .handler
            .execute("add guest to household", |list| {
                let next = list.add_guest_to_household(household_id, &guest_id)?;
                with_household(next, household_id)
            })
            .await
            .map(|r| r.output);

        if result.is_ok() {
            tracing::info!(%household_id, %guest_id, "guest added to household");
        }
        record("add_guest_to_household", result)
    }

    /// Moves a guest to another household.
    #[tracing::instrument(skip(self))]
    pub async fn move_guest(&self, cmd: MoveGuest) -> Result<Household, DomainError> {
        let _guard = self.writer.lock().await;
        let household_id = cmd.household_id;
        let guest_id = cmd.guest_id;

        let result = self
            .handler
            .execute("move guest", |list| {
                let next = list.move_guest_to_household(&guest_id, household_id)?;
                with_household(next, household_id)
            })
            .await
            .map(|r| r.output);

        if result.is_ok() {
            tracing::info!(%household_id, %guest_id, "guest moved");
        }
        record("move_guest", result)
    }

    /// Applies a household's RSVP.
    #[tracing::instrument(skip(self, cmd), fields(code = %cmd.household_code, guests = cmd.guests.len()))]
    pub async fn rsvp(&self, cmd: Rsvp) -> Result<Household, DomainError> {
        let _guard = self.writer.lock().await;
        let code = cmd.household_code;

        let result = self
            .handler
            .execute("rsvp", |list| {
                let next = list.rsvp(&code, &cmd.guests)?;
                let household = next.household_by_code(&code).cloned().ok_or_else(|| {
                    GuestListError::HouseholdNotFound {
                        lookup: HouseholdLookup::Code(code.clone()),
                    }
                })?;
                Ok((next, household))
            })
            .await
            .map(|r| r.output);

        if result.is_ok() {
            tracing::info!(%code, "rsvp recorded");
        }
        record("rsvp", result)
    }

    /// Loads the whole guest list.
    #[tracing::instrument(skip(self))]
    pub async fn guest_list(&self) -> Result<GuestList, DomainError> {
        self.handler.load().await
    }

    /// Loads a guest by ID.
    ///
    /// Returns None if the guest doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn guest(&self, guest_id: &GuestId) -> Result<Option<Guest>, DomainError> {
        Ok(self.handler.load().await?.guest(guest_id).cloned())
    }

    /// Loads a household by ID.
    #[tracing::instrument(skip(self))]
    pub async fn household(
        &self,
        household_id: HouseholdId,
    ) -> Result<Option<Household>, DomainError> {
        Ok(self.handler.load().await?.household(household_id).cloned())
    }

    /// Loads a household by its code.
    #[tracing::instrument(skip(self))]
    pub async fn household_by_code(&self, code: &str) -> Result<Option<Household>, DomainError> {
        Ok(self.handler.load().await?.household_by_code(code).cloned())
    }
}

fn with_household(
    list: GuestList,
    household_id: HouseholdId,
) -> Result<(GuestList, Household), GuestListError> {
    let household = list
        .household(household_id)
        .cloned()
        .ok_or(GuestListError::HouseholdNotFound {
            lookup: HouseholdLookup::Id(household_id),
        })?;
    Ok((list, household))
}

/// Counts the command outcome and logs failures.
fn record<T>(command: &'static str, result: Result<T, DomainError>) -> Result<T, DomainError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(DomainError::GuestList(err)) => {
            tracing::warn!(command, code = err.code(), error = %err, "command rejected");
            "rejected"
        }
        Err(err) => {
            tracing::error!(command, error = %err, "command failed");
            "failed"
        }
    };

    metrics::counter!("guest_list_commands_total", "command" => command, "outcome" => outcome)
        .increment(1);
    result
}

//! Domain layer for the guest list service.
//!
//! This crate provides the core domain abstractions including:
//! - Aggregate trait for snapshot-persisted aggregates
//! - CommandHandler for load, apply and save with optimistic concurrency
//! - GuestList aggregate with guests, households and RSVPs
//! - GuestListService exposing the use cases

pub mod aggregate;
pub mod command;
pub mod error;
pub mod guest_list;

pub use aggregate::{Aggregate, InvariantViolation};
pub use command::{CommandHandler, CommandResult};
pub use error::DomainError;
pub use guest_list::{
    AddGuest, AddGuestToHousehold, CODE_OFFSET, CreateHousehold, Guest, GuestList,
    GuestListError, GuestListService, GuestUpdate, Household, HouseholdCode, HouseholdLookup,
    MoveGuest, NewGuest, Rsvp, ValidationError, household_code,
};

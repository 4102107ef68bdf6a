//! Shared identifier types used across the guest list crates.

mod types;

pub use types::{GuestId, HouseholdId};

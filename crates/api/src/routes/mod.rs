//! HTTP route handlers.

pub mod guests;
pub mod health;
pub mod households;
pub mod metrics;

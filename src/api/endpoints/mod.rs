//! API endpoint handlers.
//!
//! Each handler opens its own connection through `CoreState` and calls
//! straight into the scheduling engine.

pub mod appointments;
pub mod calendar;
pub mod health;
pub mod statistics;

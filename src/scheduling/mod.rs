//! Appointment scheduling engine.
//!
//! Slot catalog, availability, booking, the status state machine,
//! dashboard statistics and the month grid. Every operation takes the
//! store it reads from as an argument and re-reads on each call; nothing
//! here caches appointment state. The current date or time is passed in
//! by the caller so results are reproducible.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod error;
pub mod slots;
pub mod statistics;
pub mod status;
pub mod validation;

pub use availability::{available_slots, available_slots_for, slot_board, slot_board_for, SlotAvailability};
pub use booking::create_appointment;
pub use calendar::{build_month_grid, month_grid_for, DayCell};
pub use error::SchedulingError;
pub use slots::catalog_slots;
pub use statistics::{compute_statistics, statistics_for, AppointmentStatistics};
pub use status::{check_transition, next_statuses, update_status, Transition};
pub use validation::BookingRequest;

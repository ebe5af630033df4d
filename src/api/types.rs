//! Shared types for the API layer.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::core_state::CoreState;

/// Source of the current local time.
pub type Clock = fn() -> NaiveDateTime;

fn system_clock() -> NaiveDateTime {
    Local::now().naive_local()
}

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
/// Wraps `CoreState` plus the clock handlers read "now" from.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    clock: Clock,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self::with_clock(core, system_clock)
    }

    /// Context with a fixed notion of time, for tests and replays.
    pub fn with_clock(core: Arc<CoreState>, clock: Clock) -> Self {
        Self { core, clock }
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

//! HTTP API for the appointment book.
//!
//! Exposes the scheduling engine as JSON endpoints nested under `/api/`.
//! `api_router()` returns a composable `Router` that can be mounted on
//! any axum server instance; `server` owns the listener lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;

//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. Every response carries
//! `Cache-Control: no-store`: availability and statistics must always be
//! re-read from the store, never served from an intermediate cache.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router with the system clock.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

/// Build router from a pre-constructed `ApiContext`.
///
/// Lets tests pin the clock so "today" is deterministic.
pub fn api_router_with_ctx(ctx: ApiContext) -> Router {
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/slots", get(endpoints::appointments::catalog))
        .route("/specialties", get(endpoints::appointments::enumerations))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route("/appointments/available", get(endpoints::appointments::available))
        .route("/appointments/slots", get(endpoints::appointments::slot_board))
        .route("/appointments/upcoming", get(endpoints::appointments::upcoming))
        .route("/appointments/:id", get(endpoints::appointments::detail))
        .route(
            "/appointments/:id/status",
            patch(endpoints::appointments::update_status),
        )
        .route("/statistics", get(endpoints::statistics::summary))
        .route("/calendar", get(endpoints::calendar::month))
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .nest("/api", routes)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
}

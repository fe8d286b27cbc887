use axum::{Router, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use canned::CannedLayer;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. The catalog was built
/// before the router existed, so ready equals alive here.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Mount the mock middleware over the health routes. Requests no fixture
/// matches fall through to the router, whose default fallback answers 404.
pub fn build_router(mock: CannedLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(mock)
        .layer(TraceLayer::new_for_http())
}

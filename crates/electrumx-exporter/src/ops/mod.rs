//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness (does not touch the daemon)
//! - `/metrics` : one scrape, then Prometheus text format; 503 with an empty
//!   body when the daemon call fails

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::obs::metrics::CONTENT_TYPE;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    if !state.collector().scrape().await.is_ok() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let body = state.metrics().render();
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

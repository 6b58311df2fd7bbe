use axum::extract::State;
use axum::http::StatusCode;

use crate::common::AppState;

/// Health check endpoint
///
/// Returns 200 OK when the database answers, 503 otherwise.
/// Not rate-limited and needs no session.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unreachable"),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "health_check_failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

use axum::http::StatusCode;
use tracing::debug;

/// Liveness only: answers without touching the ledger or the finance API.
pub async fn healthcheck() -> (StatusCode, &'static str) {
    debug!("GET /healthcheck");
    (StatusCode::OK, "OK")
}

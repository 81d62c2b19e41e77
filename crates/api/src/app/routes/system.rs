use axum::http::StatusCode;

/// Liveness probe; never touches the store.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

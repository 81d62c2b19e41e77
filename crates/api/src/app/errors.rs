use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use billbook_core::DomainError;

/// Translate a domain failure into the uniform error envelope.
///
/// Nothing crosses the service boundary unformatted: every failure becomes
/// `{"success": false, "error": <message>}` with an appropriate status.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::DuplicateReceiptNo(_) => {
            json_error(StatusCode::BAD_REQUEST, "Receipt number must be unique")
        }
        DomainError::NotFound => {
            // Terminal, not an error state for logging purposes.
            tracing::debug!("receipt not found");
            json_error(StatusCode::NOT_FOUND, "Receipt not found")
        }
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use billbook_core::ReceiptId;
use billbook_receipts::ReceiptDraft;

use crate::app::services::ReceiptService;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_receipts).post(create_receipt))
        .route("/next-number", get(next_number))
        .route("/:id", get(get_receipt))
}

pub async fn list_receipts(
    Extension(service): Extension<Arc<ReceiptService>>,
    Query(query): Query<dto::ListReceiptsQuery>,
) -> axum::response::Response {
    let (start_date, end_date) = match query.parsed() {
        Ok(bounds) => bounds,
        Err(resp) => return resp,
    };

    match service.list_receipts(start_date, end_date).await {
        Ok(receipts) => dto::ok_json(receipts),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_receipt(
    Extension(service): Extension<Arc<ReceiptService>>,
    body: Result<Json<ReceiptDraft>, JsonRejection>,
) -> axum::response::Response {
    // Malformed JSON gets the same envelope as every other failure.
    let Json(draft) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, rejection.body_text())
        }
    };

    match service.create_receipt(draft).await {
        Ok(receipt) => dto::created_json(receipt),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_receipt(
    Extension(service): Extension<Arc<ReceiptService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReceiptId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid receipt id"),
    };

    match service.get_receipt(id).await {
        Ok(receipt) => dto::ok_json(receipt),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn next_number(
    Extension(service): Extension<Arc<ReceiptService>>,
) -> axum::response::Response {
    match service.next_receipt_no().await {
        Ok(next) => dto::ok_json(serde_json::json!({ "nextNumber": next })),
        Err(e) => errors::domain_error_to_response(e),
    }
}

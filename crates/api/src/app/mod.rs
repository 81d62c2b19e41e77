//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the receipt record service (validation, uniqueness
//!   pre-check, filtering) over the injected store
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query parsing and the uniform response envelope
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::context::AppContext;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(ctx: &AppContext) -> Router {
    let service = Arc::new(services::ReceiptService::new(ctx.store()));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/receipts", routes::receipts::router())
        .layer(Extension(service))
}

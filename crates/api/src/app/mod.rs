//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use rxbridge_books::BooksGateway;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `api_key` gates the invoice endpoint when set; the health endpoint is
/// always open.
pub fn build_app(gateway: Arc<dyn BooksGateway>, api_key: Option<String>) -> Router {
    let key_state = middleware::ApiKeyState::new(api_key);

    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(Extension(gateway))
            .layer(axum::middleware::from_fn_with_state(
                key_state,
                middleware::require_api_key,
            )),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(axum::middleware::from_fn(middleware::request_context))
}

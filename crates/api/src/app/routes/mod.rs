use axum::Router;

pub mod invoices;
pub mod system;

/// Router for the endpoints behind the (optional) API key.
pub fn router() -> Router {
    Router::new().nest("/invoices", invoices::router())
}

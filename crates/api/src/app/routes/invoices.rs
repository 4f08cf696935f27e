use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use rxbridge_books::{issue_invoice, BooksGateway};
use rxbridge_core::Order;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(create_invoice))
}

/// One order per call: validate, run the pipeline, map the outcome.
///
/// 200 carries the created invoice plus the distinguishable payment outcome
/// (including "invoice created, payment failed"); 500 carries the upstream
/// error detail. There is no partial-success ambiguity beyond that.
pub async fn create_invoice(
    Extension(gateway): Extension<Arc<dyn BooksGateway>>,
    Json(order): Json<Order>,
) -> axum::response::Response {
    if let Err(e) = order.validate() {
        return errors::json_error(StatusCode::BAD_REQUEST, e.to_string());
    }

    match issue_invoice(gateway.as_ref(), &order).await {
        Ok(outcome) => (StatusCode::OK, Json(dto::outcome_to_json(&outcome))).into_response(),
        Err(e) => {
            tracing::error!(order_number = %order.order_number, error = %e, "invoice flow failed");
            errors::books_error_to_response(&e)
        }
    }
}

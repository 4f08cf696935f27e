use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use rxbridge_books::BooksError;

/// Every pipeline failure is reported as 500 with the upstream error body or
/// message relayed to the caller.
pub fn books_error_to_response(err: &BooksError) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, err.upstream_detail())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}

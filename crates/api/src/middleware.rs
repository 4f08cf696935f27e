use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

/// Optional shared-secret gate for the invoice endpoint.
///
/// When no key is configured the middleware passes everything through; the
/// service then relies on network-level protection, matching the original
/// deployment.
#[derive(Clone)]
pub struct ApiKeyState {
    key: Option<String>,
}

impl ApiKeyState {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }
}

pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = &state.key else {
        return Ok(next.run(req).await);
    };

    let token = extract_bearer(req.headers())?;
    if token != expected {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}

/// Attach a per-request id and basic request fields to every log line
/// emitted while handling the request.
pub async fn request_context(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = uuid::Uuid::now_v7();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    next.run(req).instrument(span).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

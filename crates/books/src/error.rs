use thiserror::Error;

/// Errors from the accounting-system integration.
#[derive(Debug, Error)]
pub enum BooksError {
    /// A required configuration value is missing or empty.
    #[error("missing configuration: {0}")]
    Config(&'static str),

    /// The token endpoint rejected the refresh exchange. Fatal for the whole
    /// flow: no downstream call is attempted without a fresh access token.
    #[error("token refresh rejected ({status}): {body}")]
    TokenRefresh { status: u16, body: String },

    /// Network-level failure talking to the accounting system.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The accounting API returned a non-success status.
    #[error("accounting API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The accounting API returned a body we could not interpret.
    #[error("malformed accounting API response: {0}")]
    Response(String),
}

impl BooksError {
    /// Upstream detail suitable for relaying to the caller.
    pub fn upstream_detail(&self) -> String {
        match self {
            BooksError::TokenRefresh { body, .. } | BooksError::Api { body, .. }
                if !body.trim().is_empty() =>
            {
                body.clone()
            }
            other => other.to_string(),
        }
    }
}

//! Accounting-system configuration.
//!
//! Credentials, realm and endpoints are injected from the environment at
//! process start and passed explicitly into the gateway. Nothing in this
//! crate embeds a secret or URL literal beyond the public Intuit defaults.

use std::time::Duration;

use crate::error::BooksError;

const DEFAULT_API_BASE_URL: &str = "https://sandbox-quickbooks.api.intuit.com";
const DEFAULT_TOKEN_URL: &str = "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the QuickBooks Online connection.
#[derive(Debug, Clone)]
pub struct BooksConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Company/realm identifier scoping every API call.
    pub realm_id: String,
    pub api_base_url: String,
    pub token_url: String,
    /// Per-request timeout on outbound calls.
    pub timeout: Duration,
}

impl BooksConfig {
    /// Load configuration from the process environment.
    ///
    /// Required: `QBO_CLIENT_ID`, `QBO_CLIENT_SECRET`, `QBO_REFRESH_TOKEN`,
    /// `QBO_REALM_ID`. Optional: `QBO_API_BASE_URL`, `QBO_TOKEN_URL`,
    /// `QBO_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, BooksError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, BooksError> {
        fn required(
            lookup: &dyn Fn(&str) -> Option<String>,
            name: &'static str,
        ) -> Result<String, BooksError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(BooksError::Config(name))
        }

        let timeout_secs = lookup("QBO_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            client_id: required(lookup, "QBO_CLIENT_ID")?,
            client_secret: required(lookup, "QBO_CLIENT_SECRET")?,
            refresh_token: required(lookup, "QBO_REFRESH_TOKEN")?,
            realm_id: required(lookup, "QBO_REALM_ID")?,
            api_base_url: lookup("QBO_API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            token_url: lookup("QBO_TOKEN_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

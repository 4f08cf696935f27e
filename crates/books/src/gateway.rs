//! Outbound call seam for the accounting system.
//!
//! `BooksGateway` is the trait the pipeline orchestrates against;
//! `HttpBooksGateway` is the reqwest-backed production implementation. Tests
//! substitute a recording fake.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::BooksConfig;
use crate::error::BooksError;
use crate::wire::{
    CreatedInvoice, CreatedPayment, CustomerCreate, CustomerEnvelope, CustomerQueryEnvelope,
    CustomerRecord, InvoiceCreate, InvoiceEnvelope, PaymentCreate, PaymentEnvelope, TokenPair,
};

/// Unfiltered customer query; the email match happens client-side.
const CUSTOMER_QUERY: &str = "select * from Customer";

/// Outbound operations against the accounting system.
///
/// Every call except the token exchange requires a bearer access token
/// obtained through `refresh_access_token`.
#[async_trait]
pub trait BooksGateway: Send + Sync {
    async fn refresh_access_token(&self) -> Result<TokenPair, BooksError>;

    async fn query_customers(&self, access_token: &str)
        -> Result<Vec<CustomerRecord>, BooksError>;

    async fn create_customer(
        &self,
        access_token: &str,
        body: &CustomerCreate,
    ) -> Result<CustomerRecord, BooksError>;

    async fn create_invoice(
        &self,
        access_token: &str,
        body: &InvoiceCreate,
    ) -> Result<CreatedInvoice, BooksError>;

    async fn create_payment(
        &self,
        access_token: &str,
        body: &PaymentCreate,
    ) -> Result<CreatedPayment, BooksError>;
}

/// Production gateway: QuickBooks Online over HTTPS.
pub struct HttpBooksGateway {
    config: BooksConfig,
    client: reqwest::Client,
}

impl HttpBooksGateway {
    pub fn new(config: BooksConfig) -> Result<Self, BooksError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn company_url(&self, resource: &str) -> String {
        format!(
            "{}/v3/company/{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.realm_id,
            resource
        )
    }

    /// Read a response body, mapping non-success statuses to `Api` errors
    /// with the upstream body preserved.
    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, BooksError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BooksError::Api {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| BooksError::Response(e.to_string()))
    }

    async fn post_entity<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        access_token: &str,
        resource: &str,
        body: &B,
    ) -> Result<T, BooksError> {
        let resp = self
            .client
            .post(self.company_url(resource))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        Self::read_json(resp).await
    }
}

#[async_trait]
impl BooksGateway for HttpBooksGateway {
    async fn refresh_access_token(&self) -> Result<TokenPair, BooksError> {
        let resp = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.config.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BooksError::TokenRefresh {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| BooksError::Response(e.to_string()))
    }

    async fn query_customers(
        &self,
        access_token: &str,
    ) -> Result<Vec<CustomerRecord>, BooksError> {
        let resp = self
            .client
            .get(self.company_url("query"))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("query", CUSTOMER_QUERY)])
            .send()
            .await?;
        let envelope: CustomerQueryEnvelope = Self::read_json(resp).await?;
        Ok(envelope.query_response.customers)
    }

    async fn create_customer(
        &self,
        access_token: &str,
        body: &CustomerCreate,
    ) -> Result<CustomerRecord, BooksError> {
        let envelope: CustomerEnvelope = self.post_entity(access_token, "customer", body).await?;
        Ok(envelope.customer)
    }

    async fn create_invoice(
        &self,
        access_token: &str,
        body: &InvoiceCreate,
    ) -> Result<CreatedInvoice, BooksError> {
        let envelope: InvoiceEnvelope = self.post_entity(access_token, "invoice", body).await?;
        Ok(envelope.invoice)
    }

    async fn create_payment(
        &self,
        access_token: &str,
        body: &PaymentCreate,
    ) -> Result<CreatedPayment, BooksError> {
        let envelope: PaymentEnvelope = self.post_entity(access_token, "payment", body).await?;
        Ok(envelope.payment)
    }
}

//! `rxbridge-books` — QuickBooks Online integration.
//!
//! Everything the service does against the external accounting system lives
//! here: configuration, wire types, pure payload builders, the outbound HTTP
//! gateway, and the sequential issue-invoice pipeline.
//!
//! Layout:
//! - `config.rs`: credentials/realm/endpoints loaded from the environment
//! - `wire.rs`: request/response JSON shapes (QBO field names)
//! - `customer.rs`: email matching + customer-create payload
//! - `invoice.rs`: order → invoice/payment payload mapping
//! - `gateway.rs`: the outbound call seam (`BooksGateway`) + reqwest impl
//! - `pipeline.rs`: token → customer → invoice → payment orchestration

pub mod config;
pub mod customer;
pub mod error;
pub mod gateway;
pub mod invoice;
pub mod pipeline;
pub mod wire;

pub use config::BooksConfig;
pub use error::BooksError;
pub use gateway::{BooksGateway, HttpBooksGateway};
pub use pipeline::{issue_invoice, InvoiceOutcome, PaymentOutcome};

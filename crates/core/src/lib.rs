//! `rxbridge-core` — domain foundation for the pharmacy-supply ordering flow.
//!
//! This crate contains **pure domain** types (no HTTP, no external-system
//! concerns): the incoming order aggregate and the shared error model.

pub mod error;
pub mod order;

pub use error::{DomainError, DomainResult};
pub use order::{Address, CustomerContact, Order, OrderItem, PaymentStatus, SizeVariant};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Payment status reported by the ordering frontend.
///
/// Only `"paid"` has downstream meaning (it triggers payment recording in the
/// accounting system); every other value is carried but treated as unpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[serde(other)]
    Other,
}

/// One sizing variant of an ordered item (e.g. 30 DR vials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub size_value: String,
    pub size_unit: String,
    pub quantity: u32,
}

/// One line of the order as submitted by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Line amount as provided by the order source. Passed through to the
    /// accounting system verbatim; never multiplied by `quantity` here.
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub sizes: Vec<SizeVariant>,
}

/// Postal address block. Fields default to empty strings when the frontend
/// omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

/// Buyer contact details used for customer reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Company or free-form name, used when no person name is present.
    #[serde(default)]
    pub company: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub alt_phone: Option<String>,
}

impl CustomerContact {
    /// Display name for a newly created customer record: first + last name,
    /// falling back to the company/name field.
    pub fn display_name(&self) -> String {
        let full = match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(f), Some(l)) => format!("{} {}", f.trim(), l.trim()),
            (Some(f), None) => f.trim().to_string(),
            (None, Some(l)) => l.trim().to_string(),
            (None, None) => String::new(),
        };
        let full = full.trim().to_string();
        if full.is_empty() {
            self.company.clone().unwrap_or_default()
        } else {
            full
        }
    }

    /// Primary phone, falling back to the secondary phone field.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.alt_phone.as_deref().filter(|p| !p.trim().is_empty()))
    }
}

/// The caller-supplied order aggregate.
///
/// Arrives fully formed in a single request; this flow never persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub customer: CustomerContact,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_cost: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub billing_address: Address,
    #[serde(default)]
    pub shipping_address: Address,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Reject orders the invoicing pipeline cannot do anything sensible with.
    pub fn validate(&self) -> DomainResult<()> {
        if self.order_number.trim().is_empty() {
            return Err(DomainError::validation("order number is required"));
        }
        if self.customer.email.trim().is_empty() {
            return Err(DomainError::validation("buyer email is required"));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("order has no items"));
        }
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(DomainError::validation("item name is required"));
            }
            if item.quantity == 0 {
                return Err(DomainError::validation("item quantity must be positive"));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(DomainError::validation(
                    "item price must be a non-negative amount",
                ));
            }
        }
        if !self.shipping_cost.is_finite() || self.shipping_cost < 0.0 {
            return Err(DomainError::validation(
                "shipping cost must be a non-negative amount",
            ));
        }
        Ok(())
    }
}

//! Request/response JSON shapes for the QuickBooks Online API.
//!
//! Field names follow the QBO schema exactly (PascalCase, nested ref
//! objects); everything else in this crate works with these types rather
//! than raw `serde_json::Value`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// -------------------------
// OAuth token exchange
// -------------------------

/// Fresh credential pair returned by the token endpoint.
///
/// The rotated refresh token is surfaced but not persisted: this flow keeps
/// no cross-request state and re-acquires an access token per invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// -------------------------
// Shared ref objects
// -------------------------

/// (id, display-name) pair identifying a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub value: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddr {
    #[serde(rename = "Address")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    #[serde(rename = "FreeFormNumber")]
    pub free_form_number: String,
}

// -------------------------
// Customer query / create
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CustomerQueryEnvelope {
    #[serde(rename = "QueryResponse", default)]
    pub query_response: CustomerQueryResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQueryResponse {
    #[serde(rename = "Customer", default)]
    pub customers: Vec<CustomerRecord>,
}

/// Customer record as returned by the accounting system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "PrimaryEmailAddr", default, skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<EmailAddr>,
}

impl From<&CustomerRecord> for CustomerRef {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            value: record.id.clone(),
            name: record.display_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomerEnvelope {
    #[serde(rename = "Customer")]
    pub customer: CustomerRecord,
}

/// Billing address sent on customer creation. Country is always `"USA"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    #[serde(rename = "Line1")]
    pub line1: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "CountrySubDivisionCode")]
    pub country_sub_division_code: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "Country")]
    pub country: String,
}

/// Shipping address block on an invoice. Carries no country field; the
/// upstream schema is asymmetric with the billing address and that asymmetry
/// is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    #[serde(rename = "Line1")]
    pub line1: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "CountrySubDivisionCode")]
    pub country_sub_division_code: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
}

/// Body for creating a customer record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerCreate {
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "PrimaryEmailAddr")]
    pub primary_email: EmailAddr,
    #[serde(rename = "PrimaryPhone", skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<PhoneNumber>,
    #[serde(rename = "BillAddr")]
    pub bill_addr: BillingAddress,
}

// -------------------------
// Invoice create
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRef {
    pub value: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesItemLineDetail {
    #[serde(rename = "ItemRef")]
    pub item_ref: ItemRef,
    #[serde(rename = "Qty")]
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    #[serde(rename = "DetailType")]
    pub detail_type: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "SalesItemLineDetail")]
    pub detail: SalesItemLineDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoRef {
    pub value: String,
}

/// Body for creating an invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceCreate {
    #[serde(rename = "CustomerRef")]
    pub customer_ref: CustomerRef,
    #[serde(rename = "BillEmail")]
    pub bill_email: EmailAddr,
    #[serde(rename = "Line")]
    pub lines: Vec<InvoiceLine>,
    /// Calendar date only, no time component.
    #[serde(rename = "TxnDate")]
    pub txn_date: NaiveDate,
    #[serde(rename = "CustomerMemo")]
    pub customer_memo: MemoRef,
    #[serde(rename = "ShipAddr")]
    pub ship_addr: ShippingAddress,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceEnvelope {
    #[serde(rename = "Invoice")]
    pub invoice: CreatedInvoice,
}

/// Created invoice as reported back by the accounting system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedInvoice {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "TotalAmt")]
    pub total_amount: f64,
    #[serde(rename = "DocNumber", default)]
    pub doc_number: Option<String>,
}

// -------------------------
// Payment create
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedTxn {
    #[serde(rename = "TxnId")]
    pub txn_id: String,
    #[serde(rename = "TxnType")]
    pub txn_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentLine {
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "LinkedTxn")]
    pub linked_txn: Vec<LinkedTxn>,
}

/// Body for recording a payment against a created invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentCreate {
    #[serde(rename = "CustomerRef")]
    pub customer_ref: CustomerRef,
    #[serde(rename = "TotalAmt")]
    pub total_amount: f64,
    #[serde(rename = "Line")]
    pub lines: Vec<PaymentLine>,
    #[serde(rename = "TxnDate")]
    pub txn_date: NaiveDate,
    #[serde(rename = "PrivateNote")]
    pub private_note: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEnvelope {
    #[serde(rename = "Payment")]
    pub payment: CreatedPayment,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedPayment {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "TotalAmt")]
    pub total_amount: f64,
}

//! Order → invoice/payment payload mapping.
//!
//! Amounts pass through arithmetically unchanged: `item.price` is taken as
//! the line amount verbatim and is never multiplied by the quantity. Whether
//! `price` means "unit price" or "line total" in the order source schema is
//! an open product question (see DESIGN.md); this mapping preserves the
//! upstream behavior literally.

use chrono::NaiveDate;

use rxbridge_core::{Order, OrderItem};

use crate::wire::{
    CreatedInvoice, CustomerRef, EmailAddr, InvoiceCreate, InvoiceLine, ItemRef, LinkedTxn,
    MemoRef, PaymentCreate, PaymentLine, SalesItemLineDetail, ShippingAddress,
};

/// Placeholder catalog item id used for every product line.
pub const CATALOG_ITEM_REF: &str = "1";

/// Catalog reference for the synthetic shipping line.
pub const SHIPPING_ITEM_REF: &str = "SHIPPING";

const SALES_ITEM_DETAIL: &str = "SalesItemLineDetail";
const INVOICE_TXN_TYPE: &str = "Invoice";

/// Human-readable line description: item name plus the formatted size
/// breakdown, e.g. `"Vial 30ct - 30 DR (2), 60 DR (1)"`. An item without
/// size variants keeps its bare name.
pub fn line_description(item: &OrderItem) -> String {
    if item.sizes.is_empty() {
        return item.name.clone();
    }
    let sizes = item
        .sizes
        .iter()
        .map(|s| format!("{} {} ({})", s.size_value, s.size_unit, s.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {}", item.name, sizes)
}

fn item_line(item: &OrderItem) -> InvoiceLine {
    InvoiceLine {
        detail_type: SALES_ITEM_DETAIL.to_string(),
        amount: item.price,
        description: line_description(item),
        detail: SalesItemLineDetail {
            item_ref: ItemRef {
                value: CATALOG_ITEM_REF.to_string(),
                name: item.name.clone(),
            },
            qty: item.quantity,
        },
    }
}

fn shipping_line(shipping_cost: f64) -> InvoiceLine {
    InvoiceLine {
        detail_type: SALES_ITEM_DETAIL.to_string(),
        amount: shipping_cost,
        description: "Shipping".to_string(),
        detail: SalesItemLineDetail {
            item_ref: ItemRef {
                value: SHIPPING_ITEM_REF.to_string(),
                name: "Shipping".to_string(),
            },
            qty: 1,
        },
    }
}

/// Memo carried on the invoice: the explicit order note, or a default
/// referencing the order number.
pub fn invoice_memo(order: &Order) -> String {
    order
        .note
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Order #: {}", order.order_number))
}

/// Assemble the invoice body for a resolved customer. `txn_date` is the
/// current calendar date at the call site (passed in for determinism).
pub fn build_invoice(order: &Order, customer: &CustomerRef, txn_date: NaiveDate) -> InvoiceCreate {
    let mut lines: Vec<InvoiceLine> = order.items.iter().map(item_line).collect();
    if order.shipping_cost > 0.0 {
        lines.push(shipping_line(order.shipping_cost));
    }

    InvoiceCreate {
        customer_ref: customer.clone(),
        bill_email: EmailAddr {
            address: order.customer.email.clone(),
        },
        lines,
        txn_date,
        customer_memo: MemoRef {
            value: invoice_memo(order),
        },
        ship_addr: ShippingAddress {
            line1: order.shipping_address.street.clone(),
            city: order.shipping_address.city.clone(),
            country_sub_division_code: order.shipping_address.state.clone(),
            postal_code: order.shipping_address.postal_code.clone(),
        },
    }
}

/// Assemble the payment body linking back to the created invoice.
pub fn build_payment(
    order: &Order,
    customer: &CustomerRef,
    invoice: &CreatedInvoice,
    txn_date: NaiveDate,
) -> PaymentCreate {
    PaymentCreate {
        customer_ref: customer.clone(),
        total_amount: invoice.total_amount,
        lines: vec![PaymentLine {
            amount: invoice.total_amount,
            linked_txn: vec![LinkedTxn {
                txn_id: invoice.id.clone(),
                txn_type: INVOICE_TXN_TYPE.to_string(),
            }],
        }],
        txn_date,
        private_note: format!("Payment for Order #: {}", order.order_number),
    }
}

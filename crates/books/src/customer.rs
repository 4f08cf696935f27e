//! Customer reconciliation against the accounting system.
//!
//! The upstream query is deliberately unfiltered (`select * from Customer`)
//! with the email equality applied client-side; see DESIGN.md for why that
//! behavior is preserved rather than pushed into the query.

use rxbridge_core::Order;

use crate::wire::{BillingAddress, CustomerCreate, CustomerRecord, CustomerRef, EmailAddr, PhoneNumber};

/// Country written on every newly created customer's billing address.
pub const BILLING_COUNTRY: &str = "USA";

/// Find an existing customer by email: case-insensitive exact match, first
/// match wins (record order is whatever the accounting API returned).
pub fn match_customer_by_email(records: &[CustomerRecord], email: &str) -> Option<CustomerRef> {
    records
        .iter()
        .find(|record| {
            record
                .primary_email
                .as_ref()
                .is_some_and(|e| e.address.eq_ignore_ascii_case(email))
        })
        .map(CustomerRef::from)
}

/// Build the customer-create body for a buyer with no existing record.
pub fn customer_create_payload(order: &Order) -> CustomerCreate {
    let contact = &order.customer;
    CustomerCreate {
        display_name: contact.display_name(),
        primary_email: EmailAddr {
            address: contact.email.clone(),
        },
        primary_phone: contact.primary_phone().map(|p| PhoneNumber {
            free_form_number: p.to_string(),
        }),
        bill_addr: BillingAddress {
            line1: order.billing_address.street.clone(),
            city: order.billing_address.city.clone(),
            country_sub_division_code: order.billing_address.state.clone(),
            postal_code: order.billing_address.postal_code.clone(),
            country: BILLING_COUNTRY.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxbridge_core::{Address, CustomerContact, OrderItem, PaymentStatus};

    fn record(id: &str, name: &str, email: Option<&str>) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            display_name: name.to_string(),
            primary_email: email.map(|e| EmailAddr {
                address: e.to_string(),
            }),
        }
    }

    fn test_order(contact: CustomerContact) -> Order {
        Order {
            order_number: "1001".to_string(),
            customer: contact,
            items: vec![OrderItem {
                name: "Caps".to_string(),
                price: 1.0,
                quantity: 1,
                sizes: vec![],
            }],
            shipping_cost: 0.0,
            payment_status: PaymentStatus::Pending,
            note: None,
            billing_address: Address {
                street: "1 Main St".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                postal_code: "78701".to_string(),
            },
            shipping_address: Address::default(),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let records = vec![record("7", "Dana Reyes", Some("Dana@Clinic.Test"))];
        let found = match_customer_by_email(&records, "dana@clinic.test").unwrap();
        assert_eq!(found.value, "7");
        assert_eq!(found.name, "Dana Reyes");
    }

    #[test]
    fn first_match_wins() {
        let records = vec![
            record("1", "No Email", None),
            record("2", "First", Some("shared@clinic.test")),
            record("3", "Second", Some("shared@clinic.test")),
        ];
        let found = match_customer_by_email(&records, "shared@clinic.test").unwrap();
        assert_eq!(found.value, "2");
    }

    #[test]
    fn no_match_returns_none() {
        let records = vec![record("1", "Dana", Some("dana@clinic.test"))];
        assert!(match_customer_by_email(&records, "other@clinic.test").is_none());
    }

    #[test]
    fn records_without_email_are_skipped() {
        let records = vec![record("1", "No Email", None)];
        assert!(match_customer_by_email(&records, "any@clinic.test").is_none());
    }

    #[test]
    fn create_payload_uses_person_name_and_usa_country() {
        let order = test_order(CustomerContact {
            first_name: Some("Dana".to_string()),
            last_name: Some("Reyes".to_string()),
            company: Some("Reyes Pharmacy".to_string()),
            email: "dana@clinic.test".to_string(),
            phone: None,
            alt_phone: Some("555-0199".to_string()),
        });

        let payload = customer_create_payload(&order);
        assert_eq!(payload.display_name, "Dana Reyes");
        assert_eq!(payload.primary_email.address, "dana@clinic.test");
        assert_eq!(
            payload.primary_phone.unwrap().free_form_number,
            "555-0199"
        );
        assert_eq!(payload.bill_addr.country, "USA");
        assert_eq!(payload.bill_addr.country_sub_division_code, "TX");
    }

    #[test]
    fn create_payload_falls_back_to_company_name() {
        let order = test_order(CustomerContact {
            first_name: None,
            last_name: None,
            company: Some("Reyes Pharmacy".to_string()),
            email: "orders@reyes.test".to_string(),
            phone: None,
            alt_phone: None,
        });

        let payload = customer_create_payload(&order);
        assert_eq!(payload.display_name, "Reyes Pharmacy");
        assert!(payload.primary_phone.is_none());
    }
}

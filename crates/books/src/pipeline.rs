//! The issue-invoice pipeline.
//!
//! Strictly linear per request: token → customer resolution → invoice build
//! → invoice submission → conditional payment recording. No retries, no
//! rollback, no cross-request state; a failure before invoice submission
//! aborts the flow, while a payment failure after a successful invoice is
//! surfaced as a distinguishable outcome rather than an overall error (the
//! invoice exists upstream either way).

use chrono::Utc;

use rxbridge_core::Order;

use crate::customer::{customer_create_payload, match_customer_by_email};
use crate::error::BooksError;
use crate::gateway::BooksGateway;
use crate::invoice::{build_invoice, build_payment};
use crate::wire::{CreatedInvoice, CreatedPayment, CustomerRef};

/// Outcome of the conditional payment-recording step.
#[derive(Debug)]
pub enum PaymentOutcome {
    /// Order was not marked paid; no payment submission was attempted.
    NotRequired,
    /// Payment was recorded against the created invoice.
    Recorded(CreatedPayment),
    /// Invoice creation succeeded but payment recording failed. The invoice
    /// remains in the accounting system without a linked payment.
    Failed(BooksError),
}

impl PaymentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PaymentOutcome::Failed(_))
    }
}

/// Result of a fully processed order.
#[derive(Debug)]
pub struct InvoiceOutcome {
    pub customer: CustomerRef,
    pub invoice: CreatedInvoice,
    pub payment: PaymentOutcome,
}

/// Run the whole flow for one order.
///
/// Invariants: the customer reference is resolved before the invoice is
/// built (the invoice requires it); the invoice is created before any
/// payment; at most one payment is submitted, and only for paid orders.
pub async fn issue_invoice<G: BooksGateway + ?Sized>(
    gateway: &G,
    order: &Order,
) -> Result<InvoiceOutcome, BooksError> {
    // Token acquisition is mandatory; any failure short-circuits the flow
    // before a single accounting call is made.
    let token = gateway.refresh_access_token().await?;
    tracing::debug!(order_number = %order.order_number, "access token acquired");

    let customers = gateway.query_customers(&token.access_token).await?;
    let customer = match match_customer_by_email(&customers, &order.customer.email) {
        Some(found) => {
            tracing::info!(
                order_number = %order.order_number,
                customer_id = %found.value,
                "matched existing customer by email"
            );
            found
        }
        None => {
            let payload = customer_create_payload(order);
            let created = gateway.create_customer(&token.access_token, &payload).await?;
            tracing::info!(
                order_number = %order.order_number,
                customer_id = %created.id,
                "created new customer"
            );
            CustomerRef::from(&created)
        }
    };

    let txn_date = Utc::now().date_naive();
    let invoice_body = build_invoice(order, &customer, txn_date);
    let invoice = gateway.create_invoice(&token.access_token, &invoice_body).await?;
    tracing::info!(
        order_number = %order.order_number,
        invoice_id = %invoice.id,
        total_amount = invoice.total_amount,
        "invoice created"
    );

    let payment = if order.is_paid() {
        let payment_body = build_payment(order, &customer, &invoice, txn_date);
        match gateway.create_payment(&token.access_token, &payment_body).await {
            Ok(recorded) => {
                tracing::info!(
                    order_number = %order.order_number,
                    invoice_id = %invoice.id,
                    payment_id = %recorded.id,
                    "payment recorded"
                );
                PaymentOutcome::Recorded(recorded)
            }
            Err(err) => {
                // The invoice already exists upstream; report the partial
                // success instead of collapsing it into a flow error.
                tracing::error!(
                    order_number = %order.order_number,
                    invoice_id = %invoice.id,
                    error = %err,
                    "payment recording failed after invoice creation"
                );
                PaymentOutcome::Failed(err)
            }
        }
    } else {
        PaymentOutcome::NotRequired
    };

    Ok(InvoiceOutcome {
        customer,
        invoice,
        payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rxbridge_core::{Address, CustomerContact, OrderItem, PaymentStatus, SizeVariant};

    use crate::wire::{CustomerCreate, CustomerRecord, EmailAddr, InvoiceCreate, PaymentCreate, TokenPair};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Token,
        QueryCustomers,
        CreateCustomer,
        CreateInvoice,
        CreatePayment,
    }

    /// Recording fake: programmable responses, call log, captured bodies.
    struct FakeGateway {
        calls: Mutex<Vec<Call>>,
        existing_customers: Vec<CustomerRecord>,
        fail_token: bool,
        fail_payment: bool,
        last_invoice: Mutex<Option<InvoiceCreate>>,
        last_payment: Mutex<Option<PaymentCreate>>,
    }

    impl FakeGateway {
        fn new(existing_customers: Vec<CustomerRecord>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                existing_customers,
                fail_token: false,
                fail_payment: false,
                last_invoice: Mutex::new(None),
                last_payment: Mutex::new(None),
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn payment_calls(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| **c == Call::CreatePayment)
                .count()
        }
    }

    #[async_trait]
    impl BooksGateway for FakeGateway {
        async fn refresh_access_token(&self) -> Result<TokenPair, BooksError> {
            self.record(Call::Token);
            if self.fail_token {
                return Err(BooksError::TokenRefresh {
                    status: 400,
                    body: "invalid_grant".to_string(),
                });
            }
            Ok(TokenPair {
                access_token: "access".to_string(),
                refresh_token: "rotated".to_string(),
            })
        }

        async fn query_customers(
            &self,
            _access_token: &str,
        ) -> Result<Vec<CustomerRecord>, BooksError> {
            self.record(Call::QueryCustomers);
            Ok(self.existing_customers.clone())
        }

        async fn create_customer(
            &self,
            _access_token: &str,
            body: &CustomerCreate,
        ) -> Result<CustomerRecord, BooksError> {
            self.record(Call::CreateCustomer);
            Ok(CustomerRecord {
                id: "900".to_string(),
                display_name: body.display_name.clone(),
                primary_email: Some(body.primary_email.clone()),
            })
        }

        async fn create_invoice(
            &self,
            _access_token: &str,
            body: &InvoiceCreate,
        ) -> Result<CreatedInvoice, BooksError> {
            self.record(Call::CreateInvoice);
            let total = body.lines.iter().map(|l| l.amount).sum();
            *self.last_invoice.lock().unwrap() = Some(body.clone());
            Ok(CreatedInvoice {
                id: "145".to_string(),
                total_amount: total,
                doc_number: Some("INV-145".to_string()),
            })
        }

        async fn create_payment(
            &self,
            _access_token: &str,
            body: &PaymentCreate,
        ) -> Result<CreatedPayment, BooksError> {
            self.record(Call::CreatePayment);
            if self.fail_payment {
                return Err(BooksError::Api {
                    status: 400,
                    body: "payment rejected".to_string(),
                });
            }
            *self.last_payment.lock().unwrap() = Some(body.clone());
            Ok(CreatedPayment {
                id: "77".to_string(),
                total_amount: body.total_amount,
            })
        }
    }

    fn existing_customer(email: &str) -> CustomerRecord {
        CustomerRecord {
            id: "58".to_string(),
            display_name: "Dana Reyes".to_string(),
            primary_email: Some(EmailAddr {
                address: email.to_string(),
            }),
        }
    }

    fn paid_order() -> Order {
        Order {
            order_number: "1001".to_string(),
            customer: CustomerContact {
                first_name: Some("Dana".to_string()),
                last_name: Some("Reyes".to_string()),
                company: None,
                email: "dana@clinic.test".to_string(),
                phone: Some("555-0100".to_string()),
                alt_phone: None,
            },
            items: vec![OrderItem {
                name: "Vial 30ct".to_string(),
                price: 29.99,
                quantity: 2,
                sizes: vec![SizeVariant {
                    size_value: "30".to_string(),
                    size_unit: "DR".to_string(),
                    quantity: 2,
                }],
            }],
            shipping_cost: 5.0,
            payment_status: PaymentStatus::Paid,
            note: None,
            billing_address: Address::default(),
            shipping_address: Address::default(),
        }
    }

    #[tokio::test]
    async fn paid_order_runs_full_sequence_with_exactly_one_payment() {
        let gateway = FakeGateway::new(vec![existing_customer("dana@clinic.test")]);
        let order = paid_order();

        let outcome = issue_invoice(&gateway, &order).await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec![
                Call::Token,
                Call::QueryCustomers,
                Call::CreateInvoice,
                Call::CreatePayment,
            ]
        );
        assert_eq!(gateway.payment_calls(), 1);
        assert_eq!(outcome.customer.value, "58");
        assert_eq!(outcome.invoice.id, "145");

        // Item line + shipping line.
        let invoice = gateway.last_invoice.lock().unwrap().clone().unwrap();
        assert_eq!(invoice.lines.len(), 2);

        // Payment links to the created invoice's id.
        let payment = gateway.last_payment.lock().unwrap().clone().unwrap();
        assert_eq!(payment.lines[0].linked_txn[0].txn_id, "145");
        match outcome.payment {
            PaymentOutcome::Recorded(p) => assert_eq!(p.id, "77"),
            _ => panic!("Expected recorded payment"),
        }
    }

    #[tokio::test]
    async fn matched_customer_is_not_recreated() {
        let gateway = FakeGateway::new(vec![existing_customer("DANA@CLINIC.TEST")]);
        let order = paid_order();

        let outcome = issue_invoice(&gateway, &order).await.unwrap();

        assert!(!gateway.calls().contains(&Call::CreateCustomer));
        assert_eq!(outcome.customer.value, "58");
        assert_eq!(outcome.customer.name, "Dana Reyes");
    }

    #[tokio::test]
    async fn unmatched_email_creates_a_customer_first() {
        let gateway = FakeGateway::new(vec![existing_customer("other@clinic.test")]);
        let order = paid_order();

        let outcome = issue_invoice(&gateway, &order).await.unwrap();

        let calls = gateway.calls();
        assert!(calls.contains(&Call::CreateCustomer));
        // Customer creation precedes invoice creation.
        let create_pos = calls.iter().position(|c| *c == Call::CreateCustomer).unwrap();
        let invoice_pos = calls.iter().position(|c| *c == Call::CreateInvoice).unwrap();
        assert!(create_pos < invoice_pos);
        assert_eq!(outcome.customer.value, "900");
        assert_eq!(outcome.customer.name, "Dana Reyes");
    }

    #[tokio::test]
    async fn unpaid_order_submits_no_payment() {
        let gateway = FakeGateway::new(vec![existing_customer("dana@clinic.test")]);
        let mut order = paid_order();
        order.payment_status = PaymentStatus::Pending;

        let outcome = issue_invoice(&gateway, &order).await.unwrap();

        assert_eq!(gateway.payment_calls(), 0);
        assert!(matches!(outcome.payment, PaymentOutcome::NotRequired));
    }

    #[tokio::test]
    async fn token_failure_short_circuits_before_any_accounting_call() {
        let mut gateway = FakeGateway::new(vec![]);
        gateway.fail_token = true;
        let order = paid_order();

        let err = issue_invoice(&gateway, &order).await.unwrap_err();

        assert!(matches!(err, BooksError::TokenRefresh { .. }));
        assert_eq!(gateway.calls(), vec![Call::Token]);
    }

    #[tokio::test]
    async fn payment_failure_is_surfaced_as_partial_success() {
        let mut gateway = FakeGateway::new(vec![existing_customer("dana@clinic.test")]);
        gateway.fail_payment = true;
        let order = paid_order();

        let outcome = issue_invoice(&gateway, &order).await.unwrap();

        // Invoice exists; the payment failure is distinguishable, not fatal.
        assert_eq!(outcome.invoice.id, "145");
        assert!(outcome.payment.is_failed());
        assert_eq!(gateway.payment_calls(), 1);
    }
}

use rxbridge_books::{InvoiceOutcome, PaymentOutcome};

/// Map a pipeline outcome to the response envelope: `success` plus invoice
/// data, with the payment step reported as its own distinguishable field.
pub fn outcome_to_json(outcome: &InvoiceOutcome) -> serde_json::Value {
    let payment = match &outcome.payment {
        PaymentOutcome::NotRequired => serde_json::json!({ "status": "not_required" }),
        PaymentOutcome::Recorded(p) => serde_json::json!({
            "status": "recorded",
            "payment_id": p.id,
            "total_amount": p.total_amount,
        }),
        PaymentOutcome::Failed(e) => serde_json::json!({
            "status": "failed",
            "message": e.upstream_detail(),
        }),
    };

    serde_json::json!({
        "success": true,
        "data": {
            "invoice_id": outcome.invoice.id,
            "total_amount": outcome.invoice.total_amount,
            "doc_number": outcome.invoice.doc_number,
            "customer": {
                "id": outcome.customer.value,
                "name": outcome.customer.name,
            },
        },
        "payment": payment,
    })
}

//! In-process gateway used by tests and local development.
//!
//! Signs receipts with its own secret so the full
//! create-order -> pay -> verify round trip runs without network access.
//! The production deployment swaps in a real gateway behind the same
//! trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::gateway::{PaymentError, PaymentGateway, PaymentOrder, PaymentReceipt};
use crate::signature::{compute_receipt_hmac, verify_receipt_hmac};

/// Deterministic local gateway.
pub struct LocalGateway {
    secret: String,
}

impl LocalGateway {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Produce the receipt a successful client-side payment would hand
    /// back for the given order. Test convenience.
    pub fn settle(&self, order: &PaymentOrder) -> PaymentReceipt {
        let payment_id = format!("pay_{}", Uuid::now_v7().simple());
        let signature = compute_receipt_hmac(&self.secret, &order.order_id, &payment_id);
        PaymentReceipt {
            order_id: order.order_id.clone(),
            payment_id,
            signature,
        }
    }
}

#[async_trait]
impl PaymentGateway for LocalGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentOrder, PaymentError> {
        let order = PaymentOrder {
            order_id: format!("order_{}", Uuid::now_v7().simple()),
            amount,
            currency: currency.to_string(),
        };
        tracing::debug!(order_id = %order.order_id, amount, currency, "Payment order created");
        Ok(order)
    }

    async fn verify_signature(&self, receipt: &PaymentReceipt) -> Result<bool, PaymentError> {
        Ok(verify_receipt_hmac(
            &self.secret,
            &receipt.order_id,
            &receipt.payment_id,
            &receipt.signature,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Payment gateway contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An order registered with the gateway before the client-side payment
/// step runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
}

/// The client-side payment result handed back for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// External payment service boundary.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register an order for `amount` minor units of `currency`.
    async fn create_order(&self, amount: i64, currency: &str)
        -> Result<PaymentOrder, PaymentError>;

    /// Check a receipt's signature. `false` means the receipt must be
    /// rejected before any storage write is attempted.
    async fn verify_signature(&self, receipt: &PaymentReceipt) -> Result<bool, PaymentError>;
}

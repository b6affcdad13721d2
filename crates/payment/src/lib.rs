//! Payment gateway contract and signature verification.
//!
//! Order creation and payment capture run against an external gateway; the
//! booking flow depends only on the [`PaymentGateway`] trait. Signature
//! verification is the one piece owned here: the gateway signs
//! `"{order_id}|{payment_id}"` with the merchant secret, and a booking is
//! never attempted for a receipt that fails verification.

pub mod gateway;
pub mod local;
pub mod signature;

pub use gateway::{PaymentError, PaymentGateway, PaymentOrder, PaymentReceipt};
pub use local::LocalGateway;

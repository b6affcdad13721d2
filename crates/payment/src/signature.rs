//! Payment receipt HMAC signing and verification.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with the merchant secret
//! using HMAC-SHA256 and hands the hex digest back alongside the payment
//! id. Verification recomputes the digest and compares.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex-encoded HMAC-SHA256 receipt signature.
pub fn compute_receipt_hmac(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Check a receipt signature against the merchant secret.
pub fn verify_receipt_hmac(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    compute_receipt_hmac(secret, order_id, payment_id) == signature
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

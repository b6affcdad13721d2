//! Booking error taxonomy.
//!
//! `SlotNotFound` and `AlreadyBooked` are expected, user-facing outcomes of
//! racing for a slot. Callers branch on them for messaging; they are not
//! system failures. Everything propagates as a typed result; nothing in
//! the booking flow panics across the module boundary.

use sarathi_core::types::Id;
use sarathi_payment::PaymentError;
use sarathi_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Course not found: {0}")]
    CourseNotFound(Id),

    #[error("Slot not found: {slot_id} on course {course_id}")]
    SlotNotFound { course_id: Id, slot_id: Id },

    /// The slot was taken by a concurrent booking. Exactly one of any set
    /// of racing callers succeeds; the rest see this.
    #[error("Slot {slot_id} is already booked")]
    AlreadyBooked { slot_id: Id },

    /// The receipt signature did not verify. Raised before any storage
    /// write is attempted.
    #[error("Payment verification failed for order {order_id}")]
    PaymentVerificationFailed { order_id: String },

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] PaymentError),

    /// The store could not be reached or the commit kept losing the
    /// version race past the retry cap. Never leaves half-applied state.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl BookingError {
    /// Whether this is an expected business outcome to show the user, as
    /// opposed to a system failure worth alerting on.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::CourseNotFound(_)
                | Self::SlotNotFound { .. }
                | Self::AlreadyBooked { .. }
                | Self::PaymentVerificationFailed { .. }
        )
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

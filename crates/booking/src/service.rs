//! The atomic slot-reservation transaction.
//!
//! `book_slot` is the one place in the platform requiring cross-request
//! mutual exclusion. It runs an optimistic read-check-commit loop against
//! the store's versioned write: read the course, verify the target slot is
//! open, and commit the new booking together with the updated slot list as
//! one atomic write. A commit that loses the version race retries from a
//! fresh read, so for any two concurrent attempts on the same slot exactly
//! one succeeds and the other observes `AlreadyBooked`. No lost updates,
//! no double booking.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use sarathi_core::booking::{derive_booked_name, Booking};
use sarathi_core::course::BookedBy;
use sarathi_core::localization::Language;
use sarathi_core::types::Id;
use sarathi_payment::{PaymentGateway, PaymentOrder, PaymentReceipt};
use sarathi_store::{CourseStore, StoreError, VersionedCourse};

use crate::config::BookingConfig;
use crate::error::BookingError;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A completed registration flow ready to reserve a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub course_id: Id,
    pub slot_id: Id,
    /// Account holder, or `None` for guest bookings.
    pub user_id: Option<String>,
    /// Submitted answers keyed by field label.
    pub form_data: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Public booking flow service.
pub struct BookingService {
    store: Arc<dyn CourseStore>,
    gateway: Arc<dyn PaymentGateway>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn CourseStore>,
        gateway: Arc<dyn PaymentGateway>,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    /// Register a payment order for a course's fee.
    pub async fn create_order(&self, amount: i64) -> Result<PaymentOrder, BookingError> {
        Ok(self
            .gateway
            .create_order(amount, &self.config.currency)
            .await?)
    }

    /// Payment-gated entry point: verify the receipt signature, then book.
    ///
    /// The transaction is never attempted for an unverifiable receipt; the
    /// gateway's `payment_id` is passed through as the booking's
    /// transaction id.
    pub async fn confirm_and_book(
        &self,
        request: BookingRequest,
        receipt: &PaymentReceipt,
    ) -> Result<Booking, BookingError> {
        if !self.gateway.verify_signature(receipt).await? {
            tracing::warn!(
                order_id = %receipt.order_id,
                course_id = %request.course_id,
                "Rejected booking attempt with unverifiable payment signature"
            );
            return Err(BookingError::PaymentVerificationFailed {
                order_id: receipt.order_id.clone(),
            });
        }

        self.book_slot(request, receipt.payment_id.clone()).await
    }

    /// Atomically reserve a slot.
    ///
    /// All-or-nothing: on any failure no booking record exists and the
    /// slot's `booked_by` is unchanged. `AlreadyBooked` is an expected
    /// outcome under contention, not an error to retry.
    pub async fn book_slot(
        &self,
        request: BookingRequest,
        transaction_id: String,
    ) -> Result<Booking, BookingError> {
        for attempt in 0..=self.config.max_commit_retries {
            let doc = self
                .store
                .get_course(request.course_id)
                .await?
                .ok_or(BookingError::CourseNotFound(request.course_id))?;
            let VersionedCourse {
                version,
                mut course,
            } = doc;

            let Some(slot) = course.slot(request.slot_id) else {
                return Err(BookingError::SlotNotFound {
                    course_id: request.course_id,
                    slot_id: request.slot_id,
                });
            };
            if slot.booked_by.is_some() {
                return Err(BookingError::AlreadyBooked {
                    slot_id: request.slot_id,
                });
            }

            let booking = Booking {
                id: Uuid::now_v7(),
                user_id: request.user_id.clone(),
                course_id: course.id,
                course_title: course.title.resolve(Language::En).to_string(),
                slot_id: slot.id,
                slot_date: slot.date.clone(),
                slot_start_time: slot.start_time.clone(),
                slot_end_time: slot.end_time.clone(),
                form_data: request.form_data.clone(),
                submitted_at: Utc::now(),
                transaction_id: transaction_id.clone(),
                payment_verified: false,
            };

            let name = derive_booked_name(&request.form_data).to_string();
            if let Some(slot) = course.slot_mut(request.slot_id) {
                slot.booked_by = Some(BookedBy {
                    name,
                    booking_id: booking.id,
                });
            }

            match self
                .store
                .commit_booking(request.course_id, version, course, booking.clone())
                .await
            {
                Ok(_) => {
                    tracing::info!(
                        booking_id = %booking.id,
                        course_id = %request.course_id,
                        slot_id = %request.slot_id,
                        transaction_id = %transaction_id,
                        "Slot booked"
                    );
                    return Ok(booking);
                }
                Err(StoreError::VersionConflict { found, .. }) => {
                    // Someone else committed to this course; re-read and
                    // re-check the slot.
                    tracing::warn!(
                        course_id = %request.course_id,
                        slot_id = %request.slot_id,
                        attempt,
                        found,
                        "Booking commit lost the version race, retrying"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(BookingError::StorageUnavailable(format!(
            "course {} kept changing under the booking commit",
            request.course_id
        )))
    }
}

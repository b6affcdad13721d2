//! The transactional document-store contract.
//!
//! The one hard guarantee is the versioned compare-and-swap write: a
//! commit applies only if the course document has not changed since it was
//! read. The scope is a single course document (two slots on different
//! courses never contend), which is what makes the booking transaction
//! race-free without any external lock service.

use async_trait::async_trait;
use serde::Deserialize;

use sarathi_core::booking::Booking;
use sarathi_core::course::Course;
use sarathi_core::types::Id;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Read types
// ---------------------------------------------------------------------------

/// A course document together with the version observed at read time.
///
/// The version must be handed back on the conditional write; it is how the
/// store detects a concurrent commit in between.
#[derive(Debug, Clone)]
pub struct VersionedCourse {
    pub version: u64,
    pub course: Course,
}

/// Filter for booking queries (admin back-office).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub course_id: Option<Id>,
    pub user_id: Option<String>,
    pub payment_verified: Option<bool>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        if self.course_id.is_some_and(|id| id != booking.course_id) {
            return false;
        }
        if let Some(user_id) = &self.user_id {
            if booking.user_id.as_deref() != Some(user_id.as_str()) {
                return false;
            }
        }
        if self
            .payment_verified
            .is_some_and(|verified| verified != booking.payment_verified)
        {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Insert a new course document at version 1.
    async fn create_course(&self, course: Course) -> Result<(), StoreError>;

    async fn get_course(&self, id: Id) -> Result<Option<VersionedCourse>, StoreError>;

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    /// Remove a course document. Its bookings remain as historical
    /// records.
    async fn delete_course(&self, id: Id) -> Result<(), StoreError>;

    /// Conditionally replace a course document.
    ///
    /// Applies only if the stored version still equals `expected_version`.
    /// Returns the new version on success and
    /// [`StoreError::VersionConflict`] when the document moved underneath
    /// the caller.
    async fn update_course(
        &self,
        id: Id,
        expected_version: u64,
        course: Course,
    ) -> Result<u64, StoreError>;

    /// Atomically persist a booking and its updated course document.
    ///
    /// Both writes apply or neither does, with the same conditional
    /// semantics as [`CourseStore::update_course`]. A concurrent commit to
    /// the course between read and write surfaces as a version conflict
    /// with no partial state.
    async fn commit_booking(
        &self,
        course_id: Id,
        expected_version: u64,
        course: Course,
        booking: Booking,
    ) -> Result<u64, StoreError>;

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>, StoreError>;

    /// Bookings matching the filter, newest first.
    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError>;

    /// Flip `payment_verified` to true. Idempotent: verifying an already
    /// verified booking is a no-op returning the record as-is.
    async fn mark_payment_verified(&self, booking_id: Id) -> Result<Booking, StoreError>;
}

//! Admin back-office catalog operations.
//!
//! Course creation, slot management, and form publishing all route through
//! the same versioned write path as the booking transaction, so an admin
//! edit racing a booking never loses either update. Structural form
//! validation runs before any save: the builder cannot publish a form the
//! runtime engine would trip over.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use sarathi_core::availability::SlotAvailability;
use sarathi_core::booking::Booking;
use sarathi_core::course::{Course, CourseSlot};
use sarathi_core::form::{validate_form, FormIssue, RegistrationForm};
use sarathi_core::localization::LocalizedString;
use sarathi_core::types::Id;
use sarathi_store::{BookingFilter, CourseStore, StoreError, VersionedCourse};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// DTO for creating a course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: LocalizedString,
    pub description: LocalizedString,
    /// Price in minor currency units.
    pub price: i64,
    pub registration_form: RegistrationForm,
}

/// DTO for appending a slot to a course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSlot {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Course not found: {0}")]
    CourseNotFound(Id),

    #[error("Booking not found: {0}")]
    BookingNotFound(Id),

    #[error("Slot not found: {slot_id} on course {course_id}")]
    SlotNotFound { course_id: Id, slot_id: Id },

    /// Booked slots are historical records; they stay attached to the
    /// course until the whole course is deleted.
    #[error("Slot {slot_id} is booked and cannot be removed")]
    SlotBooked { slot_id: Id },

    #[error("Registration form has {} structural issue(s)", .issues.len())]
    InvalidForm { issues: Vec<FormIssue> },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity: "Course", id } => Self::CourseNotFound(id),
            StoreError::NotFound { entity: "Booking", id } => Self::BookingNotFound(id),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Number of times an admin write re-reads after losing the version race.
const MAX_UPDATE_RETRIES: u32 = 5;

/// Admin catalog service.
pub struct CatalogService {
    store: Arc<dyn CourseStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    /// Create a course with an empty slot list.
    ///
    /// The registration form must be structurally sound; every issue is
    /// returned at once so the builder UI can annotate the whole form.
    pub async fn create_course(&self, new: NewCourse) -> Result<Course, CatalogError> {
        let issues = validate_form(&new.registration_form);
        if !issues.is_empty() {
            return Err(CatalogError::InvalidForm { issues });
        }

        let course = Course {
            id: Uuid::now_v7(),
            title: new.title,
            description: new.description,
            price: new.price,
            registration_form: new.registration_form,
            slots: Vec::new(),
            created_at: Utc::now(),
        };
        self.store.create_course(course.clone()).await?;
        tracing::info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    pub async fn get_course(&self, course_id: Id) -> Result<Course, CatalogError> {
        self.store
            .get_course(course_id)
            .await?
            .map(|doc| doc.course)
            .ok_or(CatalogError::CourseNotFound(course_id))
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.store.list_courses().await?)
    }

    /// Remove a course and its remaining open slots. Bookings stay behind
    /// as historical records.
    pub async fn delete_course(&self, course_id: Id) -> Result<(), CatalogError> {
        self.store.delete_course(course_id).await?;
        tracing::info!(course_id = %course_id, "Course deleted");
        Ok(())
    }

    /// Append slots to a course. Each gets a fresh id and starts open.
    pub async fn add_slots(
        &self,
        course_id: Id,
        new_slots: Vec<NewSlot>,
    ) -> Result<Course, CatalogError> {
        let count = new_slots.len();
        let course = self
            .update_with_retry(course_id, |course| {
                for slot in &new_slots {
                    course.slots.push(CourseSlot {
                        id: Uuid::now_v7(),
                        date: slot.date.clone(),
                        start_time: slot.start_time.clone(),
                        end_time: slot.end_time.clone(),
                        booked_by: None,
                    });
                }
                Ok(())
            })
            .await?;
        tracing::info!(course_id = %course_id, count, "Slots added");
        Ok(course)
    }

    /// Remove an open slot. Booked slots never leave their course while
    /// the course exists.
    pub async fn remove_slot(&self, course_id: Id, slot_id: Id) -> Result<Course, CatalogError> {
        self.update_with_retry(course_id, |course| {
            let Some(position) = course.slots.iter().position(|slot| slot.id == slot_id) else {
                return Err(CatalogError::SlotNotFound { course_id, slot_id });
            };
            if course.slots[position].booked_by.is_some() {
                return Err(CatalogError::SlotBooked { slot_id });
            }
            course.slots.remove(position);
            Ok(())
        })
        .await
    }

    /// Replace a course's registration form.
    pub async fn update_registration_form(
        &self,
        course_id: Id,
        form: RegistrationForm,
    ) -> Result<Course, CatalogError> {
        let issues = validate_form(&form);
        if !issues.is_empty() {
            return Err(CatalogError::InvalidForm { issues });
        }

        self.update_with_retry(course_id, |course| {
            course.registration_form = form.clone();
            Ok(())
        })
        .await
    }

    /// The date-indexed availability view for a course's booking page.
    pub async fn availability(&self, course_id: Id) -> Result<SlotAvailability, CatalogError> {
        let course = self.get_course(course_id).await?;
        Ok(SlotAvailability::index(&course.slots))
    }

    /// Bookings for the admin table, newest first.
    pub async fn list_bookings(
        &self,
        filter: &BookingFilter,
    ) -> Result<Vec<Booking>, CatalogError> {
        Ok(self.store.list_bookings(filter).await?)
    }

    /// Flip a booking's payment-verified flag. Idempotent.
    pub async fn mark_payment_verified(&self, booking_id: Id) -> Result<Booking, CatalogError> {
        let booking = self.store.mark_payment_verified(booking_id).await?;
        Ok(booking)
    }

    /// Optimistic read-modify-write with bounded retry, for admin edits
    /// racing bookings (or each other) on the same course document.
    async fn update_with_retry<F>(
        &self,
        course_id: Id,
        mut apply: F,
    ) -> Result<Course, CatalogError>
    where
        F: FnMut(&mut Course) -> Result<(), CatalogError>,
    {
        for _attempt in 0..=MAX_UPDATE_RETRIES {
            let Some(VersionedCourse {
                version,
                mut course,
            }) = self.store.get_course(course_id).await?
            else {
                return Err(CatalogError::CourseNotFound(course_id));
            };

            apply(&mut course)?;

            match self
                .store
                .update_course(course_id, version, course.clone())
                .await
            {
                Ok(_) => return Ok(course),
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(other) => return Err(other.into()),
            }
        }

        Err(CatalogError::StorageUnavailable(format!(
            "course {course_id} kept changing under the catalog update"
        )))
    }
}

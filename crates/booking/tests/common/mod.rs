//! Shared helpers for the booking integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use sarathi_booking::{BookingConfig, BookingService, CatalogService, NewCourse, NewSlot};
use sarathi_core::booking::Booking;
use sarathi_core::course::Course;
use sarathi_core::form::{FieldType, FormField, FormStep, RegistrationForm};
use sarathi_core::localization::LocalizedString;
use sarathi_core::types::Id;
use sarathi_payment::LocalGateway;
use sarathi_store::{BookingFilter, CourseStore, MemoryStore, StoreError, VersionedCourse};

pub const TEST_SECRET: &str = "merchant-secret";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ---------------------------------------------------------------------------
// Form and course builders
// ---------------------------------------------------------------------------

/// One-step form with a required Name and a required Email, the shape of
/// the simplest real course form. Returns the form and both field ids.
pub fn single_step_form() -> (RegistrationForm, Id, Id) {
    let name_id = Uuid::now_v7();
    let email_id = Uuid::now_v7();
    let form = RegistrationForm {
        steps: vec![FormStep {
            id: Uuid::now_v7(),
            name: LocalizedString::new("Your details", "உங்கள் விவரங்கள்"),
            fields: vec![
                FormField {
                    id: name_id,
                    field_type: FieldType::Text,
                    label: LocalizedString::new("Full Name", "முழு பெயர்"),
                    placeholder: None,
                    required: true,
                    options: None,
                },
                FormField {
                    id: email_id,
                    field_type: FieldType::Email,
                    label: LocalizedString::english("Email"),
                    placeholder: None,
                    required: true,
                    options: None,
                },
            ],
            navigation_rules: vec![],
        }],
    };
    (form, name_id, email_id)
}

pub fn two_wheeler_course(form: RegistrationForm) -> NewCourse {
    NewCourse {
        title: LocalizedString::new("Two Wheeler", "இரு சக்கர வாகனம்"),
        description: LocalizedString::english("Learner licence course"),
        price: 350_000,
        registration_form: form,
    }
}

pub fn slot(date: &str, start: &str, end: &str) -> NewSlot {
    NewSlot {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Service wiring
// ---------------------------------------------------------------------------

pub fn gateway() -> Arc<LocalGateway> {
    Arc::new(LocalGateway::new(TEST_SECRET))
}

pub fn booking_service(store: Arc<dyn CourseStore>) -> BookingService {
    BookingService::new(store, gateway(), BookingConfig::default())
}

pub fn catalog_service(store: Arc<dyn CourseStore>) -> CatalogService {
    CatalogService::new(store)
}

// ---------------------------------------------------------------------------
// Conflict injection
// ---------------------------------------------------------------------------

/// Store wrapper that makes the next N conditional writes lose the version
/// race, simulating commits landing on the same course from elsewhere.
pub struct ConflictingStore {
    inner: MemoryStore,
    failing_commits: AtomicU32,
    failing_updates: AtomicU32,
}

impl ConflictingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_commits: AtomicU32::new(0),
            failing_updates: AtomicU32::new(0),
        }
    }

    pub fn fail_next_commits(&self, n: u32) {
        self.failing_commits.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_updates(&self, n: u32) {
        self.failing_updates.store(n, Ordering::SeqCst);
    }

    fn take(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl CourseStore for ConflictingStore {
    async fn create_course(&self, course: Course) -> Result<(), StoreError> {
        self.inner.create_course(course).await
    }

    async fn get_course(&self, id: Id) -> Result<Option<VersionedCourse>, StoreError> {
        self.inner.get_course(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        self.inner.list_courses().await
    }

    async fn delete_course(&self, id: Id) -> Result<(), StoreError> {
        self.inner.delete_course(id).await
    }

    async fn update_course(
        &self,
        id: Id,
        expected_version: u64,
        course: Course,
    ) -> Result<u64, StoreError> {
        if Self::take(&self.failing_updates) {
            return Err(StoreError::VersionConflict {
                course_id: id,
                expected: expected_version,
                found: expected_version + 1,
            });
        }
        self.inner.update_course(id, expected_version, course).await
    }

    async fn commit_booking(
        &self,
        course_id: Id,
        expected_version: u64,
        course: Course,
        booking: Booking,
    ) -> Result<u64, StoreError> {
        if Self::take(&self.failing_commits) {
            return Err(StoreError::VersionConflict {
                course_id,
                expected: expected_version,
                found: expected_version + 1,
            });
        }
        self.inner
            .commit_booking(course_id, expected_version, course, booking)
            .await
    }

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>, StoreError> {
        self.inner.get_booking(id).await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
        self.inner.list_bookings(filter).await
    }

    async fn mark_payment_verified(&self, booking_id: Id) -> Result<Booking, StoreError> {
        self.inner.mark_payment_verified(booking_id).await
    }
}

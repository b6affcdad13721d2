//! In-memory reference implementation of the store contract.
//!
//! Backs tests and local development. All documents live under one
//! `RwLock`, so a conditional write observes and mutates course and
//! booking state in a single critical section, the same atomicity the
//! production document database provides per commit.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sarathi_core::booking::Booking;
use sarathi_core::course::Course;
use sarathi_core::types::Id;

use crate::course_store::{BookingFilter, CourseStore, VersionedCourse};
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    courses: HashMap<Id, VersionedCourse>,
    bookings: HashMap<Id, Booking>,
}

/// In-memory document store with optimistic course versioning.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn create_course(&self, course: Course) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.courses.contains_key(&course.id) {
            return Err(StoreError::Duplicate(format!("course {}", course.id)));
        }
        tracing::debug!(course_id = %course.id, "Course document created");
        inner
            .courses
            .insert(course.id, VersionedCourse { version: 1, course });
        Ok(())
    }

    async fn get_course(&self, id: Id) -> Result<Option<VersionedCourse>, StoreError> {
        Ok(self.inner.read().await.courses.get(&id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let inner = self.inner.read().await;
        let mut courses: Vec<Course> = inner
            .courses
            .values()
            .map(|doc| doc.course.clone())
            .collect();
        courses.sort_by_key(|course| course.created_at);
        Ok(courses)
    }

    async fn delete_course(&self, id: Id) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.courses.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                entity: "Course",
                id,
            });
        }
        tracing::info!(course_id = %id, "Course document deleted");
        Ok(())
    }

    async fn update_course(
        &self,
        id: Id,
        expected_version: u64,
        course: Course,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let doc = inner
            .courses
            .get_mut(&id)
            .ok_or(StoreError::NotFound {
                entity: "Course",
                id,
            })?;
        if doc.version != expected_version {
            return Err(StoreError::VersionConflict {
                course_id: id,
                expected: expected_version,
                found: doc.version,
            });
        }
        doc.version += 1;
        doc.course = course;
        tracing::debug!(course_id = %id, version = doc.version, "Course document updated");
        Ok(doc.version)
    }

    async fn commit_booking(
        &self,
        course_id: Id,
        expected_version: u64,
        course: Course,
        booking: Booking,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let Inner { courses, bookings } = &mut *inner;

        let doc = courses.get_mut(&course_id).ok_or(StoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;
        if doc.version != expected_version {
            tracing::warn!(
                course_id = %course_id,
                expected = expected_version,
                found = doc.version,
                "Booking commit lost the version race"
            );
            return Err(StoreError::VersionConflict {
                course_id,
                expected: expected_version,
                found: doc.version,
            });
        }
        if bookings.contains_key(&booking.id) {
            return Err(StoreError::Duplicate(format!("booking {}", booking.id)));
        }

        doc.version += 1;
        doc.course = course;
        let version = doc.version;
        tracing::info!(
            course_id = %course_id,
            booking_id = %booking.id,
            slot_id = %booking.slot_id,
            version,
            "Booking committed"
        );
        bookings.insert(booking.id, booking);
        Ok(version)
    }

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>, StoreError> {
        Ok(self.inner.read().await.bookings.get(&id).cloned())
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(bookings)
    }

    async fn mark_payment_verified(&self, booking_id: Id) -> Result<Booking, StoreError> {
        let mut inner = self.inner.write().await;
        let booking = inner
            .bookings
            .get_mut(&booking_id)
            .ok_or(StoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;
        if !booking.payment_verified {
            booking.payment_verified = true;
            tracing::info!(booking_id = %booking_id, "Payment marked verified");
        }
        Ok(booking.clone())
    }
}

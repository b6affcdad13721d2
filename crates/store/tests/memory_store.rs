//! Integration tests for the in-memory store engine:
//! - versioned reads and conditional writes
//! - atomic booking commits (both documents or neither)
//! - booking queries and the idempotent payment-verified flip

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use chrono::Utc;
use uuid::Uuid;

use sarathi_core::booking::Booking;
use sarathi_core::course::{BookedBy, Course, CourseSlot};
use sarathi_core::form::RegistrationForm;
use sarathi_core::localization::LocalizedString;
use sarathi_store::{BookingFilter, CourseStore, MemoryStore, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_slot(date: &str) -> CourseSlot {
    CourseSlot {
        id: Uuid::now_v7(),
        date: date.to_string(),
        start_time: "10:00".to_string(),
        end_time: "11:00".to_string(),
        booked_by: None,
    }
}

fn new_course(title: &str, slots: Vec<CourseSlot>) -> Course {
    Course {
        id: Uuid::now_v7(),
        title: LocalizedString::english(title),
        description: LocalizedString::default(),
        price: 500_000,
        registration_form: RegistrationForm { steps: vec![] },
        slots,
        created_at: Utc::now(),
    }
}

fn new_booking(course: &Course, slot: &CourseSlot, user_id: Option<&str>) -> Booking {
    Booking {
        id: Uuid::now_v7(),
        user_id: user_id.map(str::to_string),
        course_id: course.id,
        course_title: course.title.en.clone(),
        slot_id: slot.id,
        slot_date: slot.date.clone(),
        slot_start_time: slot.start_time.clone(),
        slot_end_time: slot.end_time.clone(),
        form_data: BTreeMap::new(),
        submitted_at: Utc::now(),
        transaction_id: "pay_test".to_string(),
        payment_verified: false,
    }
}

// ---------------------------------------------------------------------------
// Course documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_course_reads_back_at_version_one() {
    let store = MemoryStore::new();
    let course = new_course("Two Wheeler", vec![new_slot("2024-06-01")]);
    let id = course.id;

    store.create_course(course).await.unwrap();

    let doc = store.get_course(id).await.unwrap().unwrap();
    assert_eq!(doc.version, 1);
    assert_eq!(doc.course.id, id);
}

#[tokio::test]
async fn duplicate_course_id_is_rejected() {
    let store = MemoryStore::new();
    let course = new_course("Two Wheeler", vec![]);
    store.create_course(course.clone()).await.unwrap();

    let err = store.create_course(course).await.unwrap_err();
    assert_matches!(err, StoreError::Duplicate(_));
}

#[tokio::test]
async fn unknown_course_reads_as_none() {
    let store = MemoryStore::new();
    assert!(store.get_course(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn deleted_course_no_longer_reads_back() {
    let store = MemoryStore::new();
    let course = new_course("Two Wheeler", vec![]);
    let id = course.id;
    store.create_course(course).await.unwrap();

    store.delete_course(id).await.unwrap();
    assert!(store.get_course(id).await.unwrap().is_none());

    let err = store.delete_course(id).await.unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "Course", .. });
}

#[tokio::test]
async fn conditional_update_applies_at_matching_version() {
    let store = MemoryStore::new();
    let mut course = new_course("Two Wheeler", vec![]);
    let id = course.id;
    store.create_course(course.clone()).await.unwrap();

    course.slots.push(new_slot("2024-06-01"));
    let version = store.update_course(id, 1, course).await.unwrap();
    assert_eq!(version, 2);

    let doc = store.get_course(id).await.unwrap().unwrap();
    assert_eq!(doc.course.slots.len(), 1);
}

#[tokio::test]
async fn conditional_update_rejects_stale_version() {
    let store = MemoryStore::new();
    let course = new_course("Two Wheeler", vec![]);
    let id = course.id;
    store.create_course(course.clone()).await.unwrap();
    store.update_course(id, 1, course.clone()).await.unwrap();

    let err = store.update_course(id, 1, course).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::VersionConflict {
            expected: 1,
            found: 2,
            ..
        }
    );
}

// ---------------------------------------------------------------------------
// Booking commits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn booking_commit_writes_both_documents() {
    let store = MemoryStore::new();
    let mut course = new_course("Four Wheeler", vec![new_slot("2024-06-01")]);
    let course_id = course.id;
    store.create_course(course.clone()).await.unwrap();

    let slot = course.slots[0].clone();
    let booking = new_booking(&course, &slot, Some("user-1"));
    course.slots[0].booked_by = Some(BookedBy {
        name: "Kumar".to_string(),
        booking_id: booking.id,
    });

    store
        .commit_booking(course_id, 1, course, booking.clone())
        .await
        .unwrap();

    // Pairing invariant: slot points at the booking and the booking exists.
    let doc = store.get_course(course_id).await.unwrap().unwrap();
    let booked_by = doc.course.slots[0].booked_by.as_ref().unwrap();
    assert_eq!(booked_by.booking_id, booking.id);
    assert!(store.get_booking(booking.id).await.unwrap().is_some());
}

#[tokio::test]
async fn conflicting_booking_commit_leaves_no_partial_state() {
    let store = MemoryStore::new();
    let mut course = new_course("Four Wheeler", vec![new_slot("2024-06-01")]);
    let course_id = course.id;
    store.create_course(course.clone()).await.unwrap();

    // Another writer bumps the course to version 2 first.
    store
        .update_course(course_id, 1, course.clone())
        .await
        .unwrap();

    let slot = course.slots[0].clone();
    let booking = new_booking(&course, &slot, None);
    course.slots[0].booked_by = Some(BookedBy {
        name: "Guest".to_string(),
        booking_id: booking.id,
    });

    let err = store
        .commit_booking(course_id, 1, course, booking.clone())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::VersionConflict { .. });

    // Neither document changed: slot still open, booking absent.
    let doc = store.get_course(course_id).await.unwrap().unwrap();
    assert!(doc.course.slots[0].booked_by.is_none());
    assert!(store.get_booking(booking.id).await.unwrap().is_none());
}

#[tokio::test]
async fn booking_commit_for_unknown_course_is_not_found() {
    let store = MemoryStore::new();
    let course = new_course("Four Wheeler", vec![new_slot("2024-06-01")]);
    let slot = course.slots[0].clone();
    let booking = new_booking(&course, &slot, None);

    let err = store
        .commit_booking(course.id, 1, course, booking)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "Course", .. });
}

// ---------------------------------------------------------------------------
// Booking queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_bookings_filters_by_course_and_user() {
    let store = MemoryStore::new();
    let mut course_a = new_course("Two Wheeler", vec![new_slot("2024-06-01")]);
    let mut course_b = new_course("Four Wheeler", vec![new_slot("2024-06-02")]);
    store.create_course(course_a.clone()).await.unwrap();
    store.create_course(course_b.clone()).await.unwrap();

    let slot_a = course_a.slots[0].clone();
    let booking_a = new_booking(&course_a, &slot_a, Some("user-1"));
    course_a.slots[0].booked_by = Some(BookedBy {
        name: "Kumar".to_string(),
        booking_id: booking_a.id,
    });
    store
        .commit_booking(course_a.id, 1, course_a.clone(), booking_a.clone())
        .await
        .unwrap();

    let slot_b = course_b.slots[0].clone();
    let booking_b = new_booking(&course_b, &slot_b, None);
    course_b.slots[0].booked_by = Some(BookedBy {
        name: "Guest".to_string(),
        booking_id: booking_b.id,
    });
    store
        .commit_booking(course_b.id, 1, course_b.clone(), booking_b.clone())
        .await
        .unwrap();

    let by_course = store
        .list_bookings(&BookingFilter {
            course_id: Some(course_a.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_course.len(), 1);
    assert_eq!(by_course[0].id, booking_a.id);

    let by_user = store
        .list_bookings(&BookingFilter {
            user_id: Some("user-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].id, booking_a.id);

    let all = store.list_bookings(&BookingFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn list_bookings_filters_by_payment_state() {
    let store = MemoryStore::new();
    let mut course = new_course("Two Wheeler", vec![new_slot("2024-06-01")]);
    store.create_course(course.clone()).await.unwrap();

    let slot = course.slots[0].clone();
    let booking = new_booking(&course, &slot, None);
    course.slots[0].booked_by = Some(BookedBy {
        name: "Guest".to_string(),
        booking_id: booking.id,
    });
    store
        .commit_booking(course.id, 1, course, booking.clone())
        .await
        .unwrap();

    let unverified = store
        .list_bookings(&BookingFilter {
            payment_verified: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(unverified.len(), 1);

    store.mark_payment_verified(booking.id).await.unwrap();

    let unverified = store
        .list_bookings(&BookingFilter {
            payment_verified: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(unverified.is_empty());
}

// ---------------------------------------------------------------------------
// Payment-verified flip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mark_payment_verified_is_idempotent() {
    let store = MemoryStore::new();
    let mut course = new_course("Two Wheeler", vec![new_slot("2024-06-01")]);
    store.create_course(course.clone()).await.unwrap();

    let slot = course.slots[0].clone();
    let booking = new_booking(&course, &slot, None);
    course.slots[0].booked_by = Some(BookedBy {
        name: "Guest".to_string(),
        booking_id: booking.id,
    });
    store
        .commit_booking(course.id, 1, course, booking.clone())
        .await
        .unwrap();

    let first = store.mark_payment_verified(booking.id).await.unwrap();
    assert!(first.payment_verified);

    let second = store.mark_payment_verified(booking.id).await.unwrap();
    assert!(second.payment_verified);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn mark_payment_verified_unknown_booking_is_not_found() {
    let store = MemoryStore::new();
    let err = store.mark_payment_verified(Uuid::now_v7()).await.unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "Booking", .. });
}

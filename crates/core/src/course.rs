//! Course aggregate: a catalog entry owning its registration form and
//! bookable slots.
//!
//! The course document exclusively owns its slot list. Slots are appended
//! by the admin catalog operations and flipped to booked exactly once by
//! the booking transaction; a booked slot is never deleted while the
//! course exists.

use serde::{Deserialize, Serialize};

use crate::form::RegistrationForm;
use crate::localization::LocalizedString;
use crate::types::{Id, Timestamp};

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Who holds a booked slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedBy {
    /// Display name derived from the submitted form data.
    pub name: String,
    /// The booking record holding this slot.
    pub booking_id: Id,
}

/// A bookable date/time window belonging to one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSlot {
    pub id: Id,
    /// Calendar date in ISO `YYYY-MM-DD` form.
    pub date: String,
    /// Window start, `HH:mm`.
    pub start_time: String,
    /// Window end, `HH:mm`.
    pub end_time: String,
    /// Set exactly once by the booking transaction; never cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<BookedBy>,
}

impl CourseSlot {
    pub fn is_open(&self) -> bool {
        self.booked_by.is_none()
    }
}

// ---------------------------------------------------------------------------
// Course
// ---------------------------------------------------------------------------

/// Aggregate root for one course in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    pub title: LocalizedString,
    pub description: LocalizedString,
    /// Price in minor currency units (paise).
    pub price: i64,
    pub registration_form: RegistrationForm,
    pub slots: Vec<CourseSlot>,
    pub created_at: Timestamp,
}

impl Course {
    pub fn slot(&self, slot_id: Id) -> Option<&CourseSlot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn slot_mut(&mut self, slot_id: Id) -> Option<&mut CourseSlot> {
        self.slots.iter_mut().find(|slot| slot.id == slot_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

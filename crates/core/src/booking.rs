//! Booking record and booked-by name derivation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Id, Timestamp};

// ---------------------------------------------------------------------------
// Booking record
// ---------------------------------------------------------------------------

/// Persisted record of a completed slot reservation.
///
/// Created exactly once per successful booking transaction, in the same
/// atomic write that marks the slot booked. The slot details are denormalized
/// onto the record so the admin table renders without re-reading courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Id,
    /// Account holder, or `None` for guest bookings.
    pub user_id: Option<String>,
    pub course_id: Id,
    pub course_title: String,
    pub slot_id: Id,
    pub slot_date: String,
    pub slot_start_time: String,
    pub slot_end_time: String,
    /// Submitted answers keyed by field label, as captured by the form flow.
    pub form_data: BTreeMap<String, String>,
    pub submitted_at: Timestamp,
    /// Payment gateway reference passed through from signature verification.
    pub transaction_id: String,
    /// Starts `false`; flipped once by the explicit admin verification action.
    pub payment_verified: bool,
}

// ---------------------------------------------------------------------------
// Booked-by name derivation
// ---------------------------------------------------------------------------

/// Shown when the form carries no recognisable name answer.
pub const FALLBACK_BOOKED_NAME: &str = "Guest";

/// Form-data keys scanned, in order, for the booked-by display name.
///
/// Legacy convention: public forms label their name field "Full Name"
/// (older forms used "Name"). Kept so existing course forms keep producing
/// named slot holders.
const BOOKED_NAME_KEYS: [&str; 2] = ["Full Name", "Name"];

/// Derive the display name recorded on a booked slot.
pub fn derive_booked_name(form_data: &BTreeMap<String, String>) -> &str {
    BOOKED_NAME_KEYS
        .iter()
        .find_map(|key| {
            form_data
                .get(*key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or(FALLBACK_BOOKED_NAME)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

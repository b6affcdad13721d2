//! Slot availability index.
//!
//! Groups a course's slots by calendar date and computes which dates still
//! have at least one open slot, for the booking page's date picker.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::course::CourseSlot;

/// Date-indexed view over a course's slot list.
#[derive(Debug, Clone, Default)]
pub struct SlotAvailability {
    /// Every slot, booked or open, grouped by its raw date string.
    /// Insertion order is preserved within a date (admin-defined order).
    pub by_date: BTreeMap<String, Vec<CourseSlot>>,
    /// Dates with at least one open slot, ascending. Only valid ISO dates
    /// appear here; malformed dates stay grouped but are never advertised.
    pub available_dates: Vec<String>,
}

impl SlotAvailability {
    /// Build the index from a course's slot list.
    pub fn index(slots: &[CourseSlot]) -> Self {
        let mut by_date: BTreeMap<String, Vec<CourseSlot>> = BTreeMap::new();
        for slot in slots {
            by_date
                .entry(slot.date.clone())
                .or_default()
                .push(slot.clone());
        }

        let mut datable: Vec<(NaiveDate, String)> = by_date
            .iter()
            .filter(|(_, slots)| slots.iter().any(CourseSlot::is_open))
            .filter_map(|(date, _)| parse_slot_date(date).map(|parsed| (parsed, date.clone())))
            .collect();
        datable.sort_by_key(|(parsed, _)| *parsed);

        Self {
            by_date,
            available_dates: datable.into_iter().map(|(_, date)| date).collect(),
        }
    }

    /// Whether the given date still has an open slot.
    pub fn has_open_slot(&self, date: &str) -> bool {
        self.available_dates.iter().any(|d| d == date)
    }

    /// Slots on the given date, in admin-defined order. Empty for unknown
    /// dates.
    pub fn slots_on(&self, date: &str) -> &[CourseSlot] {
        self.by_date.get(date).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parse a slot date, returning `None` for anything that is not a valid
/// ISO `YYYY-MM-DD` date.
fn parse_slot_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

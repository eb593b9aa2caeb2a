//! Weekly meeting occurrences.
//!
//! # Time Model
//! Times are minutes since midnight on the slot's day. Intervals are
//! half-open: a slot ending at 10:50 and another starting at 10:50 do not
//! overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DayCode;

/// Campus sentinel used when the feed gives no campus.
pub const UNKNOWN_CAMPUS: &str = "UNKNOWN";

/// One weekly meeting: a day, a [start, end) minute interval, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Meeting day.
    pub day: DayCode,
    /// Start (minutes since midnight, inclusive).
    pub start_minutes: u16,
    /// End (minutes since midnight, exclusive).
    pub end_minutes: u16,
    /// Uppercased campus name.
    pub campus: String,
    /// "BUILDING ROOM", empty if unknown.
    pub room: String,
}

impl TimeSlot {
    /// Creates a slot on an unknown campus with no room.
    pub fn new(day: DayCode, start_minutes: u16, end_minutes: u16) -> Self {
        Self {
            day,
            start_minutes,
            end_minutes,
            campus: UNKNOWN_CAMPUS.to_string(),
            room: String::new(),
        }
    }

    /// Creates a slot from `(hour, minute)` pairs.
    pub fn at(day: DayCode, start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(day, start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    /// Sets the campus (uppercased).
    pub fn with_campus(mut self, campus: impl AsRef<str>) -> Self {
        self.campus = campus.as_ref().trim().to_uppercase();
        self
    }

    /// Sets the room string.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Length of the meeting in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// Whether two slots overlap: same day and `max(start) < min(end)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_minutes.max(other.start_minutes)
                < self.end_minutes.min(other.end_minutes)
    }

    /// Idle minutes between two same-day slots, one entirely before the other.
    ///
    /// Returns `None` if the slots are on different days, overlap, or are
    /// not strictly ordered (a zero-length slot inside another one).
    pub fn gap_minutes(&self, other: &Self) -> Option<u16> {
        if self.day != other.day || self.overlaps(other) {
            return None;
        }
        if self.end_minutes <= other.start_minutes {
            Some(other.start_minutes - self.end_minutes)
        } else if other.end_minutes <= self.start_minutes {
            Some(self.start_minutes - other.end_minutes)
        } else {
            None
        }
    }

    /// Whether the slot has no positive length (`start >= end`).
    pub fn is_degenerate(&self) -> bool {
        self.duration_minutes() == 0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02} ({})",
            self.day,
            self.start_minutes / 60,
            self.start_minutes % 60,
            self.end_minutes / 60,
            self.end_minutes % 60,
            self.campus
        )
    }
}

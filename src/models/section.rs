//! Section (course offering) model and meeting-record parsing.
//!
//! A section owns the weekly [`TimeSlot`]s parsed from the catalog feed's
//! raw meeting records. Records that cannot be turned into a valid slot
//! are dropped with a warning and the section carries fewer slots.
//!
//! # Feed time encoding
//! Times arrive as `"1030"` or `"10:30"` with a separate AM/PM code that
//! applies to the whole record. A meeting crossing noon may carry an
//! `"A"` code although its end time is afternoon; whenever the computed
//! end falls before the start, 12 hours are added to the end.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::time_slot::UNKNOWN_CAMPUS;
use super::{DayCode, TimeSlot};

const HALF_DAY_MINUTES: u16 = 12 * 60;

/// A raw meeting record as delivered by the catalog feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeeting {
    #[serde(default)]
    pub meeting_day: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// `"A"` or `"P"`.
    #[serde(default)]
    pub pm_code: Option<String>,
    #[serde(default)]
    pub campus_name: Option<String>,
    #[serde(default)]
    pub campus_location: Option<String>,
    #[serde(default)]
    pub building_code: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Instructor entries come either as plain names or `{ "name": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstructor {
    Name(String),
    Record { name: String },
}

impl RawInstructor {
    fn into_name(self) -> String {
        match self {
            RawInstructor::Name(name) | RawInstructor::Record { name } => name,
        }
    }
}

/// A raw section record as delivered by the catalog feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(default = "default_section_number")]
    pub number: String,
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default)]
    pub instructors: Vec<RawInstructor>,
    #[serde(default)]
    pub meeting_times: Vec<RawMeeting>,
    #[serde(default)]
    pub open_status: bool,
}

fn default_section_number() -> String {
    "UNKNOWN".to_string()
}

fn default_index() -> String {
    "00000".to_string()
}

/// Why a meeting record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MeetingSkip {
    /// No meeting day (asynchronous/online). Not a data problem.
    NoDay,
    UnknownDay,
    MissingTime,
    MalformedTime,
    InvertedInterval,
}

/// One offering of a course.
///
/// Immutable after construction; the scheduler only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section number within the course (e.g. "01").
    pub section_number: String,
    /// Registration index.
    pub index: String,
    /// Instructor names.
    pub instructors: Vec<String>,
    /// Parsed weekly meetings.
    pub time_slots: Vec<TimeSlot>,
    /// Whether the section accepts enrollment.
    pub is_open: bool,
}

impl Section {
    /// Creates an open section with no meetings.
    pub fn new(section_number: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            section_number: section_number.into(),
            index: index.into(),
            instructors: Vec::new(),
            time_slots: Vec::new(),
            is_open: true,
        }
    }

    /// Adds a meeting.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, name: impl Into<String>) -> Self {
        self.instructors.push(name.into());
        self
    }

    /// Marks the section closed.
    pub fn closed(mut self) -> Self {
        self.is_open = false;
        self
    }

    /// Builds a section from a feed record, parsing its meetings.
    pub fn from_raw(raw: RawSection) -> Self {
        let time_slots = parse_meetings(&raw.index, &raw.meeting_times);
        Self {
            section_number: raw.number,
            index: raw.index,
            instructors: raw
                .instructors
                .into_iter()
                .map(RawInstructor::into_name)
                .collect(),
            time_slots,
            is_open: raw.open_status,
        }
    }

    /// Whether any meeting of `self` overlaps any meeting of `other`.
    pub fn overlaps(&self, other: &Section) -> bool {
        self.time_slots
            .iter()
            .any(|a| other.time_slots.iter().any(|b| a.overlaps(b)))
    }
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        Section::from_raw(raw)
    }
}

fn parse_meetings(index: &str, meetings: &[RawMeeting]) -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(meetings.len());
    for meeting in meetings {
        match parse_meeting(meeting) {
            Ok(slot) => slots.push(slot),
            Err(MeetingSkip::NoDay) => {}
            Err(reason) => {
                warn!(
                    section_index = index,
                    ?reason,
                    day = ?meeting.meeting_day,
                    start = ?meeting.start_time,
                    end = ?meeting.end_time,
                    "dropping unparseable meeting record"
                );
            }
        }
    }
    slots
}

pub(crate) fn parse_meeting(meeting: &RawMeeting) -> Result<TimeSlot, MeetingSkip> {
    let day_token = non_empty(meeting.meeting_day.as_deref()).ok_or(MeetingSkip::NoDay)?;
    let day = DayCode::from_token(day_token).ok_or(MeetingSkip::UnknownDay)?;

    let start = non_empty(meeting.start_time.as_deref()).ok_or(MeetingSkip::MissingTime)?;
    let end = non_empty(meeting.end_time.as_deref()).ok_or(MeetingSkip::MissingTime)?;

    let pm = meeting
        .pm_code
        .as_deref()
        .map(|c| c.trim().eq_ignore_ascii_case("P"))
        .unwrap_or(false);

    let start_minutes = clock_minutes(start, pm).ok_or(MeetingSkip::MalformedTime)?;
    let mut end_minutes = clock_minutes(end, pm).ok_or(MeetingSkip::MalformedTime)?;

    // Crosses noon with a misleading AM code.
    if end_minutes < start_minutes {
        end_minutes += HALF_DAY_MINUTES;
    }
    if start_minutes >= end_minutes {
        return Err(MeetingSkip::InvertedInterval);
    }

    let campus = non_empty(meeting.campus_name.as_deref())
        .or_else(|| non_empty(meeting.campus_location.as_deref()))
        .unwrap_or(UNKNOWN_CAMPUS);

    let building = non_empty(meeting.building_code.as_deref())
        .or_else(|| non_empty(meeting.building.as_deref()))
        .unwrap_or("");
    let room = non_empty(meeting.room_number.as_deref())
        .or_else(|| non_empty(meeting.room.as_deref()))
        .unwrap_or("");

    Ok(TimeSlot::new(day, start_minutes, end_minutes)
        .with_campus(campus)
        .with_room(format!("{building} {room}").trim()))
}

/// Converts `"1030"`, `"10:30"`, `"930"` or `"9"` to minutes since midnight.
///
/// With `pm` set, hours other than 12 are shifted into the afternoon.
/// A 12 o'clock hour is left alone either way.
pub(crate) fn clock_minutes(raw: &str, pm: bool) -> Option<u16> {
    let digits: String = raw.trim().chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.as_str(), "0"),
        3 => digits.split_at(1),
        4 => digits.split_at(2),
        _ => return None,
    };
    let mut hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    if pm && hours < 12 {
        hours += 12;
    }
    Some(hours * 60 + minutes)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

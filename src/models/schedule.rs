//! Schedule (solution) model.
//!
//! A schedule picks exactly one section per requested course. It borrows
//! the courses and sections it was built from; the search never copies or
//! mutates catalog data.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{Course, Section};

/// One course with the section chosen for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledSection<'a> {
    /// The requested course.
    pub course: &'a Course,
    /// The section selected for it.
    pub section: &'a Section,
}

impl Serialize for ScheduledSection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScheduledSection", 4)?;
        state.serialize_field("course_code", &self.course.code)?;
        state.serialize_field("course_title", &self.course.title)?;
        state.serialize_field("credits", &self.course.credits)?;
        state.serialize_field("section", self.section)?;
        state.end()
    }
}

/// A complete, conflict-free selection of sections.
///
/// Entries follow the scheduler's internal course order (fewest sections
/// first), not necessarily the order the courses were requested in.
/// Use [`Schedule::section_for`] to look up by course code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule<'a> {
    /// Selected sections.
    pub entries: Vec<ScheduledSection<'a>>,
}

impl<'a> Schedule<'a> {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn add(&mut self, course: &'a Course, section: &'a Section) {
        self.entries.push(ScheduledSection { course, section });
    }

    /// Selected sections, in entry order.
    pub fn sections(&self) -> impl Iterator<Item = &'a Section> + '_ {
        self.entries.iter().map(|e| e.section)
    }

    /// Course codes, in entry order.
    pub fn course_codes(&self) -> Vec<&'a str> {
        self.entries.iter().map(|e| e.course.code.as_str()).collect()
    }

    /// Section chosen for a course code.
    pub fn section_for(&self, course_code: &str) -> Option<&'a Section> {
        self.entries
            .iter()
            .find(|e| e.course.code == course_code)
            .map(|e| e.section)
    }

    /// Sum of course credits.
    pub fn total_credits(&self) -> f64 {
        self.entries.iter().map(|e| e.course.credits).sum()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A rule broken by a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Kind of violation.
    pub violation_type: ViolationType,
    /// Course codes involved.
    pub course_codes: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two meetings overlap in time.
    TimeOverlap,
    /// Not enough time to travel between campuses.
    TravelBuffer,
    /// A meeting falls on an excluded day.
    ExcludedDay,
    /// A selected section is closed.
    ClosedSection,
    /// A course and its direct prerequisite were both selected.
    PrerequisiteConflict,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        course_codes: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            course_codes,
            message: message.into(),
        }
    }
}

//! Course scheduling domain models.
//!
//! Value types describing what can be scheduled and what a solution
//! looks like. All of them are immutable inputs from the scheduler's
//! point of view.
//!
//! # Domain Mappings
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`TimeSlot`] | One weekly meeting (day, minutes, campus, room) |
//! | [`Section`] | One offering of a course, owning its time slots |
//! | [`Course`] | Title, code, sections, prerequisites, credits |
//! | [`ScheduleConstraints`] | Days that must stay free |
//! | [`Schedule`] | One section per course, conflict-free |

mod constraints;
mod course;
mod day;
mod schedule;
mod section;
mod time_slot;

pub use constraints::ScheduleConstraints;
pub use course::{Course, DEFAULT_CREDITS};
pub use day::{DayCode, UnknownDay};
pub use schedule::{Schedule, ScheduledSection, Violation, ViolationType};
pub use section::{RawInstructor, RawMeeting, RawSection, Section};
pub use time_slot::{TimeSlot, UNKNOWN_CAMPUS};

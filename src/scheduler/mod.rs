//! Schedule search.
//!
//! Given requested courses and constraints, enumerates combinations of one
//! section per course with no time overlap, enough travel time between
//! campuses, no meeting on an excluded day, and no course requested
//! together with its direct prerequisite.
//!
//! # Algorithm
//!
//! [`SchedulingEngine`] runs a depth-first backtracking search with
//! most-constrained-course-first ordering and early rejection. It returns
//! *any* feasible schedules up to a cap, not a ranked best set.
//!
//! # Travel
//!
//! [`TravelPolicy`] decides how many minutes two same-day meetings on
//! different campuses must be apart.

mod engine;
mod placement;
mod travel;

pub use engine::{SchedulingEngine, SearchReport, SearchStats};
pub use travel::{CampusPair, TravelPolicy};

//! Course-section schedule generation.
//!
//! Given the courses a student wants and the weekdays they want kept free,
//! enumerates weekly timetables that pick exactly one open section per
//! course with no overlapping meetings, enough time to travel between
//! campuses, and no course taken alongside its own prerequisite.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Section`, `Course`,
//!   `ScheduleConstraints`, `Schedule`, and the raw feed records
//! - **`scheduler`**: Backtracking `SchedulingEngine` and `TravelPolicy`
//! - **`catalog`**: `CourseRepository` and the JSON feed catalog
//! - **`validation`**: Input integrity checks and schedule auditing
//! - **`config`**: Serde-loadable engine policy
//!
//! # Example
//!
//! ```
//! use section_scheduler::models::{Course, DayCode, ScheduleConstraints, Section, TimeSlot};
//! use section_scheduler::scheduler::SchedulingEngine;
//!
//! let courses = vec![
//!     Course::new("198:111", "Intro CS").with_section(
//!         Section::new("01", "09214")
//!             .with_slot(TimeSlot::at(DayCode::Monday, (10, 20), (11, 40)).with_campus("BUSCH")),
//!     ),
//!     Course::new("640:151", "Calc I").with_section(
//!         Section::new("01", "11032")
//!             .with_slot(TimeSlot::at(DayCode::Tuesday, (10, 20), (11, 40)).with_campus("LIV")),
//!     ),
//! ];
//!
//! let engine = SchedulingEngine::new();
//! let schedules = engine.generate_schedules(&courses, &ScheduleConstraints::new(), 50);
//! assert_eq!(schedules.len(), 1);
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", ch. 6
//!   (backtracking search, minimum-remaining-values ordering)

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError};

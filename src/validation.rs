//! Input validation and schedule auditing.
//!
//! [`validate_courses`] checks the structural integrity of a course list
//! before a search. Detects:
//! - Duplicate course codes
//! - Malformed course codes
//! - Courses with no sections, or no open section
//! - Courses listing themselves as a prerequisite
//! - Meetings with no positive length
//!
//! The engine tolerates all of these (the result is just empty or
//! redundant), so validation is advisory for callers that want to report
//! problems instead of silently returning nothing.
//!
//! [`audit_schedule`] re-checks a finished schedule against every rule the
//! search enforces. Engine output always audits clean; hand-assembled
//! schedules may not.

use std::collections::HashSet;

use crate::models::{Course, Schedule, ScheduleConstraints, Violation, ViolationType};
use crate::scheduler::TravelPolicy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same code.
    DuplicateCode,
    /// A code is not of the form `SUBJECT:NUMBER`.
    MalformedCode,
    /// A course has no sections.
    EmptyCourse,
    /// A course has sections but none is open.
    NoOpenSection,
    /// A course lists its own code as a prerequisite.
    SelfPrerequisite,
    /// A meeting ends at or before its start.
    DegenerateSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a course list before searching.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_courses(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut codes = HashSet::new();

    for course in courses {
        if !codes.insert(course.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate course code: {}", course.code),
            ));
        }

        if !is_well_formed_code(&course.code) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedCode,
                format!("Course code '{}' is not SUBJECT:NUMBER", course.code),
            ));
        }

        if course.sections.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no sections", course.code),
            ));
        } else if course.open_sections().next().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoOpenSection,
                format!("Course '{}' has no open sections", course.code),
            ));
        }

        if course.prereqs.contains(&course.code) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPrerequisite,
                format!("Course '{}' lists itself as a prerequisite", course.code),
            ));
        }

        for section in &course.sections {
            for slot in section.time_slots.iter().filter(|s| s.is_degenerate()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DegenerateSlot,
                    format!(
                        "Section {} of '{}' has an empty meeting: {slot}",
                        section.index, course.code
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_well_formed_code(code: &str) -> bool {
    match code.split_once(':') {
        Some((subject, number)) => {
            !subject.trim().is_empty() && !number.trim().is_empty()
        }
        None => false,
    }
}

/// Lists every rule a schedule breaks.
///
/// Checks each entry for closed sections and excluded days, and each pair
/// of entries for prerequisite conflicts, overlapping meetings, and
/// insufficient travel gaps.
pub fn audit_schedule(
    schedule: &Schedule<'_>,
    constraints: &ScheduleConstraints,
    travel: &TravelPolicy,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for entry in &schedule.entries {
        let code = &entry.course.code;
        if !entry.section.is_open {
            violations.push(Violation::new(
                ViolationType::ClosedSection,
                vec![code.clone()],
                format!("Section {} of {} is closed", entry.section.index, code),
            ));
        }
        for slot in &entry.section.time_slots {
            if constraints.excludes(slot.day) {
                violations.push(Violation::new(
                    ViolationType::ExcludedDay,
                    vec![code.clone()],
                    format!("{code} meets on excluded day {}", slot.day),
                ));
            }
        }
    }

    for (i, a) in schedule.entries.iter().enumerate() {
        for b in &schedule.entries[i + 1..] {
            let pair = vec![a.course.code.clone(), b.course.code.clone()];

            if a.course.conflicts_with(b.course) {
                violations.push(Violation::new(
                    ViolationType::PrerequisiteConflict,
                    pair.clone(),
                    format!(
                        "{} and {} cannot be taken together (prerequisite)",
                        a.course.code, b.course.code
                    ),
                ));
            }

            for x in &a.section.time_slots {
                for y in &b.section.time_slots {
                    if x.overlaps(y) {
                        violations.push(Violation::new(
                            ViolationType::TimeOverlap,
                            pair.clone(),
                            format!("{x} overlaps {y}"),
                        ));
                    } else if !travel.compatible(x, y) {
                        violations.push(Violation::new(
                            ViolationType::TravelBuffer,
                            pair.clone(),
                            format!("not enough time to travel between {x} and {y}"),
                        ));
                    }
                }
            }
        }
    }

    violations
}

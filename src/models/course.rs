//! Course model.
//!
//! A course aggregates the sections a student can choose between, plus
//! the codes of courses it depends on. Identity is the canonical code
//! (`"SUBJECT:NUMBER"`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::Section;

/// Credits assumed when the catalog gives none.
pub const DEFAULT_CREDITS: f64 = 3.0;

/// A requestable course with its sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Human-readable title.
    pub title: String,
    /// Canonical code, e.g. `"198:111"`.
    pub code: String,
    /// Offerings, in catalog order.
    pub sections: Vec<Section>,
    /// Codes of direct prerequisites.
    pub prereqs: BTreeSet<String>,
    /// Credit weight.
    pub credits: f64,
}

impl Course {
    /// Creates a course with no sections.
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            sections: Vec::new(),
            prereqs: BTreeSet::new(),
            credits: DEFAULT_CREDITS,
        }
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a prerequisite code.
    pub fn with_prereq(mut self, code: impl Into<String>) -> Self {
        self.prereqs.insert(code.into());
        self
    }

    /// Sets the credit weight.
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    /// Whether `other` is a direct prerequisite of this course.
    pub fn requires(&self, other: &Course) -> bool {
        self.prereqs.contains(&other.code)
    }

    /// Whether either course lists the other as a prerequisite.
    pub fn conflicts_with(&self, other: &Course) -> bool {
        self.requires(other) || other.requires(self)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Sections currently accepting enrollment.
    pub fn open_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_open)
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

//! Course catalog backed by the registrar's course feed.
//!
//! A catalog turns raw feed records into [`Course`] values ready for the
//! engine. [`CourseRepository`] is the seam the rest of the crate depends
//! on; [`JsonCatalog`] is the in-memory implementation over a parsed feed
//! dump.
//!
//! # Prerequisites
//!
//! Prerequisite codes are scraped from the free-text `preReqNotes` and
//! `courseNotes` fields. Both `01:198:111` and `198:111` forms are
//! recognized and normalized to the short `198:111` form.

mod history;

pub use history::filter_completed;

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::models::{Course, RawSection, Section, DEFAULT_CREDITS};

/// Default cap on [`CourseRepository::search_courses`] hits.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

static PREREQ_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\d{2}:)?(\d{3}):(\d{3})").unwrap());

/// Source of courses for a search.
pub trait CourseRepository {
    /// Returns the courses whose codes are listed, in catalog order.
    /// Unknown codes are skipped.
    fn get_courses(&self, codes: &[&str]) -> Vec<Course>;

    /// Returns courses whose subject equals `query` or whose title
    /// contains it, case-insensitively.
    fn search_courses(&self, query: &str) -> Vec<Course>;
}

/// One course record as it appears in the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub course_number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub pre_req_notes: Option<String>,
    #[serde(default)]
    pub course_notes: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

impl RawCourse {
    /// `SUBJECT:NUMBER`.
    pub fn code(&self) -> String {
        format!("{}:{}", self.subject.trim(), self.course_number.trim())
    }

    /// Builds the engine-facing course, parsing every section.
    pub fn to_course(&self) -> Course {
        let mut course = Course::new(
            self.code(),
            self.title.as_deref().unwrap_or("Unknown Course"),
        )
        .with_credits(self.credits.unwrap_or(DEFAULT_CREDITS));

        for code in extract_prereqs(self) {
            course = course.with_prereq(code);
        }
        for raw in &self.sections {
            course = course.with_section(Section::from_raw(raw.clone()));
        }
        course
    }
}

/// Scrapes prerequisite course codes out of a record's notes.
pub fn extract_prereqs(raw: &RawCourse) -> BTreeSet<String> {
    let notes = [raw.pre_req_notes.as_deref(), raw.course_notes.as_deref()];
    notes
        .into_iter()
        .flatten()
        .flat_map(|text| PREREQ_CODE.captures_iter(text))
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
        .collect()
}

/// In-memory catalog over a parsed feed dump.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    records: Vec<RawCourse>,
    search_limit: usize,
}

impl JsonCatalog {
    /// Creates a catalog over already-parsed records.
    pub fn new(records: Vec<RawCourse>) -> Self {
        Self {
            records,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Sets the search hit cap.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Parses a feed dump (a JSON array of course records).
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawCourse> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Parses a feed dump from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let records: Vec<RawCourse> = serde_json::from_reader(reader)?;
        Ok(Self::new(records))
    }

    /// Loads a feed dump from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), courses = catalog.len(), "loaded course catalog");
        Ok(catalog)
    }

    /// Number of course records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CourseRepository for JsonCatalog {
    fn get_courses(&self, codes: &[&str]) -> Vec<Course> {
        let mut wanted: HashSet<String> = codes
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();

        let mut found = Vec::new();
        for record in &self.records {
            if wanted.is_empty() {
                break;
            }
            if wanted.remove(&record.code()) {
                found.push(record.to_course());
            }
        }

        if !wanted.is_empty() {
            debug!(missing = ?wanted, "requested courses not in catalog");
        }
        found
    }

    fn search_courses(&self, query: &str) -> Vec<Course> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .filter(|record| {
                record.subject.trim() == query
                    || record
                        .title
                        .as_deref()
                        .is_some_and(|t| t.to_uppercase().contains(&query))
            })
            .take(self.search_limit)
            .map(RawCourse::to_course)
            .collect()
    }
}

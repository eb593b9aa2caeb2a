//! Weekday codes.
//!
//! Catalog feeds and user requests spell days in many ways ("TH",
//! "thurs", "Thursday"). Everything is normalized into [`DayCode`] once at
//! the boundary so the search only ever compares enum values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day of the week on which a class can meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayCode {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "TH")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
    #[serde(rename = "SU")]
    Sunday,
}

impl DayCode {
    /// All days, Monday first.
    pub const ALL: [DayCode; 7] = [
        DayCode::Monday,
        DayCode::Tuesday,
        DayCode::Wednesday,
        DayCode::Thursday,
        DayCode::Friday,
        DayCode::Saturday,
        DayCode::Sunday,
    ];

    /// Canonical feed code ("M", "T", "W", "TH", "F", "S", "SU").
    pub fn code(self) -> &'static str {
        match self {
            DayCode::Monday => "M",
            DayCode::Tuesday => "T",
            DayCode::Wednesday => "W",
            DayCode::Thursday => "TH",
            DayCode::Friday => "F",
            DayCode::Saturday => "S",
            DayCode::Sunday => "SU",
        }
    }

    /// Full English name, uppercased.
    pub fn name(self) -> &'static str {
        match self {
            DayCode::Monday => "MONDAY",
            DayCode::Tuesday => "TUESDAY",
            DayCode::Wednesday => "WEDNESDAY",
            DayCode::Thursday => "THURSDAY",
            DayCode::Friday => "FRIDAY",
            DayCode::Saturday => "SATURDAY",
            DayCode::Sunday => "SUNDAY",
        }
    }

    /// Normalizes a free-form day token.
    ///
    /// Accepts canonical codes exactly, and any prefix of at least two
    /// letters of the full day name ("TU", "Thurs", "saturday").
    /// Returns `None` for anything else.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_uppercase();
        if token.is_empty() {
            return None;
        }

        if let Some(day) = Self::ALL.iter().find(|d| d.code() == token) {
            return Some(*day);
        }

        if token.len() < 2 {
            return None;
        }
        Self::ALL
            .iter()
            .find(|d| d.name().starts_with(token.as_str()))
            .copied()
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for tokens that name no day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized day token: {0:?}")]
pub struct UnknownDay(pub String);

impl FromStr for DayCode {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownDay(s.to_string()))
    }
}

//! Inter-campus travel buffers.
//!
//! Consecutive same-day meetings on different physical campuses need a
//! minimum gap. A designated set of adjacent campus pairs gets the
//! shorter allowance; every other cross-campus pair gets the standard one.
//! Same-campus meetings and meetings involving a virtual campus are
//! exempt.
//!
//! Campus names are matched by substring on their uppercased form, so a
//! marker `"LIV"` covers both `"LIVINGSTON"` and `"LIV"`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::TimeSlot;

/// Two campuses close enough for the short allowance.
///
/// Order-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusPair {
    #[serde(deserialize_with = "uppercased")]
    pub a: String,
    #[serde(deserialize_with = "uppercased")]
    pub b: String,
}

impl CampusPair {
    /// Creates a pair of campus markers (uppercased).
    pub fn new(a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        Self {
            a: normalize(a.as_ref()),
            b: normalize(b.as_ref()),
        }
    }

    fn matches(&self, first: &str, second: &str) -> bool {
        (first.contains(&self.a) && second.contains(&self.b))
            || (first.contains(&self.b) && second.contains(&self.a))
    }
}

/// Minimum gaps required between meetings on different campuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPolicy {
    /// Gap (minutes) between an adjacent campus pair.
    pub short_minutes: u16,
    /// Gap (minutes) for any other cross-campus pair.
    pub standard_minutes: u16,
    /// Pairs eligible for `short_minutes`.
    pub adjacent_pairs: Vec<CampusPair>,
    /// Campus markers that denote online/virtual delivery.
    #[serde(deserialize_with = "uppercased_list")]
    pub virtual_markers: Vec<String>,
}

impl Default for TravelPolicy {
    fn default() -> Self {
        Self {
            short_minutes: 30,
            standard_minutes: 40,
            adjacent_pairs: vec![CampusPair::new("BUSCH", "LIV")],
            virtual_markers: vec!["ONLINE".to_string()],
        }
    }
}

impl TravelPolicy {
    /// A policy that never requires a gap.
    pub fn disabled() -> Self {
        Self {
            short_minutes: 0,
            standard_minutes: 0,
            adjacent_pairs: Vec::new(),
            virtual_markers: Vec::new(),
        }
    }

    /// Sets the adjacent-pair and standard allowances.
    pub fn with_minutes(mut self, short_minutes: u16, standard_minutes: u16) -> Self {
        self.short_minutes = short_minutes;
        self.standard_minutes = standard_minutes;
        self
    }

    /// Adds an adjacent campus pair.
    pub fn with_adjacent_pair(mut self, a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        self.adjacent_pairs.push(CampusPair::new(a, b));
        self
    }

    /// Adds a virtual campus marker.
    pub fn with_virtual_marker(mut self, marker: impl AsRef<str>) -> Self {
        self.virtual_markers.push(normalize(marker.as_ref()));
        self
    }

    /// Whether a campus name denotes virtual delivery.
    pub fn is_virtual(&self, campus: &str) -> bool {
        self.is_virtual_upper(&campus.to_uppercase())
    }

    /// Minimum gap between meetings on `first` and `second`.
    ///
    /// `None` when no travel is involved (same campus or virtual).
    pub fn required_gap(&self, first: &str, second: &str) -> Option<u16> {
        self.required_gap_upper(&first.to_uppercase(), &second.to_uppercase())
    }

    fn is_virtual_upper(&self, campus: &str) -> bool {
        self.virtual_markers.iter().any(|m| campus.contains(m.as_str()))
    }

    // Slot campuses are uppercased at construction.
    fn required_gap_upper(&self, first: &str, second: &str) -> Option<u16> {
        if first == second || self.is_virtual_upper(first) || self.is_virtual_upper(second) {
            return None;
        }

        if self.adjacent_pairs.iter().any(|p| p.matches(first, second)) {
            Some(self.short_minutes)
        } else {
            Some(self.standard_minutes)
        }
    }

    /// Whether two slots can both be attended.
    ///
    /// False if they overlap, or if they are on the same day at campuses
    /// that need a travel gap longer than the one available.
    pub fn compatible(&self, a: &TimeSlot, b: &TimeSlot) -> bool {
        if a.day != b.day {
            return true;
        }
        let Some(gap) = a.gap_minutes(b) else {
            return false;
        };
        match self.required_gap_upper(&a.campus, &b.campus) {
            Some(required) => gap >= required,
            None => true,
        }
    }
}

// Slot campuses are stored trimmed and uppercased, so markers must be too.
fn normalize(marker: &str) -> String {
    marker.trim().to_uppercase()
}

fn uppercased<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| normalize(&s))
}

fn uppercased_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<String>::deserialize(deserializer).map(|v| v.iter().map(String::as_str).map(normalize).collect())
}

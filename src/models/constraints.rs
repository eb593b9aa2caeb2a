//! User-facing schedule constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use super::{DayCode, Section};

/// Constraints a schedule must satisfy beyond conflict-freedom.
///
/// Currently only whole days that must stay free. Built once per request
/// from whatever day tokens the caller collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    /// Days on which no selected section may meet.
    pub excluded_days: BTreeSet<DayCode>,
}

impl ScheduleConstraints {
    /// No constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds constraints from free-form day tokens.
    ///
    /// Unrecognized tokens are ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded_days = BTreeSet::new();
        for token in tokens {
            match DayCode::from_token(token.as_ref()) {
                Some(day) => {
                    excluded_days.insert(day);
                }
                None => debug!(token = token.as_ref(), "ignoring unrecognized day token"),
            }
        }
        Self { excluded_days }
    }

    /// Adds an excluded day.
    pub fn with_excluded_day(mut self, day: DayCode) -> Self {
        self.excluded_days.insert(day);
        self
    }

    /// Whether `day` must stay free.
    #[inline]
    pub fn excludes(&self, day: DayCode) -> bool {
        self.excluded_days.contains(&day)
    }

    /// Whether a section has no meeting on an excluded day.
    pub fn permits(&self, section: &Section) -> bool {
        !section.time_slots.iter().any(|slot| self.excludes(slot.day))
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.excluded_days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    #[test]
    fn test_from_tokens_normalizes() {
        let c = ScheduleConstraints::from_tokens(["fri", "Monday", " th "]);
        assert!(c.excludes(DayCode::Friday));
        assert!(c.excludes(DayCode::Monday));
        assert!(c.excludes(DayCode::Thursday));
        assert!(!c.excludes(DayCode::Tuesday));
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let c = ScheduleConstraints::from_tokens(vec!["someday".to_string(), "F".to_string()]);
        assert_eq!(c.excluded_days.len(), 1);
        assert!(c.excludes(DayCode::Friday));

        let empty = ScheduleConstraints::from_tokens(Vec::<String>::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_permits_section() {
        let c = ScheduleConstraints::new().with_excluded_day(DayCode::Friday);
        let mwf = Section::new("01", "1")
            .with_slot(TimeSlot::at(DayCode::Monday, (9, 0), (10, 0)))
            .with_slot(TimeSlot::at(DayCode::Friday, (9, 0), (10, 0)));
        let tth = Section::new("02", "2")
            .with_slot(TimeSlot::at(DayCode::Tuesday, (9, 0), (10, 20)))
            .with_slot(TimeSlot::at(DayCode::Thursday, (9, 0), (10, 20)));
        let online = Section::new("90", "3");

        assert!(!c.permits(&mwf));
        assert!(c.permits(&tth));
        assert!(c.permits(&online));
    }
}

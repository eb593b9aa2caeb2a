//! Partial schedule stack with scoped placements.
//!
//! The search shares one stack across recursive calls. Placing a section
//! returns a [`Placement`] guard that pops it again on drop, so the stack
//! is restored on every exit path, early returns included.

use std::ops::{Deref, DerefMut};

use crate::models::Section;

/// Sections placed so far on the current search branch.
///
/// Index `i` holds the section chosen for the `i`-th course in search order.
#[derive(Debug, Default)]
pub(crate) struct PartialSchedule<'a> {
    sections: Vec<&'a Section>,
}

impl<'a> PartialSchedule<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            sections: Vec::with_capacity(capacity),
        }
    }

    /// Pushes `section`; it is popped when the returned guard drops.
    pub(crate) fn place(&mut self, section: &'a Section) -> Placement<'_, 'a> {
        self.sections.push(section);
        Placement { stack: self }
    }

    pub(crate) fn sections(&self) -> &[&'a Section] {
        &self.sections
    }

    pub(crate) fn len(&self) -> usize {
        self.sections.len()
    }
}

/// Guard for one placed section.
pub(crate) struct Placement<'s, 'a> {
    stack: &'s mut PartialSchedule<'a>,
}

impl<'a> Deref for Placement<'_, 'a> {
    type Target = PartialSchedule<'a>;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for Placement<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for Placement<'_, '_> {
    fn drop(&mut self) {
        self.stack.sections.pop();
    }
}

//! Append-only, in-memory course roster.

use serde::Serialize;

use crate::error::GpaError;
use crate::model::{CourseEntry, CourseUpdate, Year};

/// The courses entered so far, in creation order.
///
/// Courses are never removed, so a course's id is also its index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Roster {
    courses: Vec<CourseEntry>,
    #[serde(skip)]
    revision: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ungraded, zero-credit course for `year` and return its id.
    pub fn add(&mut self, year: Year) -> usize {
        let id = self.courses.len();
        self.courses.push(CourseEntry::new(id, year));
        self.revision += 1;
        tracing::debug!(id, %year, "course added");
        id
    }

    /// Apply one field edit to the course with `id`. Values are stored
    /// verbatim; nothing is validated until aggregation.
    pub fn edit(&mut self, id: usize, update: CourseUpdate) -> Result<&CourseEntry, GpaError> {
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(GpaError::UnknownCourse(id))?;

        tracing::debug!(id, field = update.field(), "course edited");
        match update {
            CourseUpdate::SetGrade(grade) => course.grade = grade,
            CourseUpdate::SetCredits(credits) => course.credits = credits,
        }
        self.revision += 1;
        Ok(&*course)
    }

    pub fn get(&self, id: usize) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseEntry> {
        self.courses.iter()
    }

    /// Courses of one year, in creation order.
    pub fn for_year(&self, year: Year) -> impl Iterator<Item = &CourseEntry> {
        self.courses.iter().filter(move |c| c.year == year)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Bumped by every successful add or edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

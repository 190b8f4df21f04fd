//! One interactive calculator session.
//!
//! A session owns the roster and the lookup tables, and keeps the last
//! computed result as a snapshot. Editing the roster never recomputes or
//! clears the snapshot; it only makes it stale.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregator::{self, GpaResult};
use crate::error::GpaError;
use crate::model::{CourseEntry, CourseUpdate, FidelityPolicy, Year};
use crate::roster::Roster;
use crate::tables::{GradeTable, YearWeights};

/// Display state of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    /// Nothing computed yet.
    #[default]
    Idle,
    /// A result is on display.
    Computed(Snapshot),
}

/// A computed result and the roster revision it reflects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub result: GpaResult,
    pub roster_revision: u64,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    grades: GradeTable,
    weights: YearWeights,
    policy: FidelityPolicy,
    state: SessionState,
}

impl Session {
    pub fn new(grades: GradeTable, weights: YearWeights, policy: FidelityPolicy) -> Self {
        Self {
            roster: Roster::new(),
            grades,
            weights,
            policy,
            state: SessionState::Idle,
        }
    }

    /// Add a course for `year`. Returns the new course id.
    pub fn add_course(&mut self, year: Year) -> usize {
        self.roster.add(year)
    }

    pub fn edit_course(
        &mut self,
        id: usize,
        update: CourseUpdate,
    ) -> Result<&CourseEntry, GpaError> {
        self.roster.edit(id, update)
    }

    /// Run the aggregator over the current roster and display the result.
    pub fn compute(&mut self) -> GpaResult {
        let result = aggregator::compute(&self.roster, &self.grades, &self.weights, self.policy);
        tracing::debug!(
            overall = result.overall_gpa,
            courses = self.roster.len(),
            excluded = result.excluded.len(),
            "gpa computed"
        );
        self.state = SessionState::Computed(Snapshot {
            result: result.clone(),
            roster_revision: self.roster.revision(),
            computed_at: Utc::now(),
        });
        result
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.state {
            SessionState::Computed(snapshot) => Some(snapshot),
            SessionState::Idle => None,
        }
    }

    /// The displayed result, if any. May be stale.
    pub fn result(&self) -> Option<&GpaResult> {
        self.snapshot().map(|s| &s.result)
    }

    /// `true` when the roster changed after the last compute.
    pub fn is_stale(&self) -> bool {
        self.snapshot()
            .is_some_and(|s| s.roster_revision != self.roster.revision())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grades(&self) -> &GradeTable {
        &self.grades
    }

    pub fn weights(&self) -> &YearWeights {
        &self.weights
    }

    pub fn policy(&self) -> FidelityPolicy {
        self.policy
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            GradeTable::default(),
            YearWeights::default(),
            FidelityPolicy::default(),
        )
    }
}

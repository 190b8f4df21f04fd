//! Core error types.
//!
//! Malformed course input never produces an error; it is excluded or
//! carried as NaN during aggregation. These variants cover the typed
//! boundaries only: years, course ids, and the lookup tables.

use thiserror::Error;

/// Errors raised by roster operations and table construction.
#[derive(Debug, Error, PartialEq)]
pub enum GpaError {
    /// A year outside `1..=4`.
    #[error("invalid year: {0} (expected 1-4)")]
    InvalidYear(String),

    /// No course with this id exists in the roster.
    #[error("unknown course id: {0}")]
    UnknownCourse(usize),

    /// The grade-point table failed validation.
    #[error("invalid grade table: {0}")]
    InvalidGradeTable(String),

    /// The year-weight table failed validation.
    #[error("invalid year weights: {0}")]
    InvalidYearWeights(String),

    /// A configuration value could not be interpreted.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GpaError {
    /// Returns `true` if the error came from user input at the roster
    /// boundary rather than from configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(self, GpaError::InvalidYear(_) | GpaError::UnknownCourse(_))
    }
}

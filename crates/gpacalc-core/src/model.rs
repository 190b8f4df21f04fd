//! Core data model types for gpacalc.
//!
//! These are the types the roster, the aggregator, and the renderers share:
//! academic years, course entries, the closed set of course edits, and the
//! aggregation policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GpaError;

/// An academic year, always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Year(u8);

impl Year {
    pub const FIRST: Year = Year(1);
    pub const SECOND: Year = Year(2);
    pub const THIRD: Year = Year(3);
    pub const FOURTH: Year = Year(4);

    /// All years in ascending order.
    pub const ALL: [Year; 4] = [Year::FIRST, Year::SECOND, Year::THIRD, Year::FOURTH];

    pub fn get(self) -> u8 {
        self.0
    }

    /// Ordinal label used in the weighting explanation ("1st", "2nd", ...).
    pub fn ordinal(self) -> &'static str {
        match self.0 {
            1 => "1st",
            2 => "2nd",
            3 => "3rd",
            _ => "4th",
        }
    }
}

impl TryFrom<u8> for Year {
    type Error = GpaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=4).contains(&value) {
            Ok(Year(value))
        } else {
            Err(GpaError::InvalidYear(value.to_string()))
        }
    }
}

impl From<Year> for u8 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl FromStr for Year {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| GpaError::InvalidYear(trimmed.to_string()))
            .and_then(Year::try_from)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single course in the roster.
///
/// `grade` and `credits` hold whatever the user entered. Nothing is
/// validated until aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Stable id, assigned at creation.
    pub id: usize,
    /// Academic year the course belongs to.
    pub year: Year,
    /// Grade symbol; empty when unset.
    #[serde(default)]
    pub grade: String,
    /// Credit load as entered.
    #[serde(default)]
    pub credits: String,
}

impl CourseEntry {
    /// A fresh entry: no grade, zero credits.
    pub fn new(id: usize, year: Year) -> Self {
        Self {
            id,
            year,
            grade: String::new(),
            credits: "0".to_string(),
        }
    }

    pub fn has_grade(&self) -> bool {
        !self.grade.is_empty()
    }
}

/// An in-place edit of one course field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseUpdate {
    /// Replace the grade symbol. An empty string unsets it.
    SetGrade(String),
    /// Replace the raw credits text.
    SetCredits(String),
}

impl CourseUpdate {
    /// Name of the field this update touches.
    pub fn field(&self) -> &'static str {
        match self {
            CourseUpdate::SetGrade(_) => "grade",
            CourseUpdate::SetCredits(_) => "credits",
        }
    }
}

/// How the aggregator treats failing grades and unparsable credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityPolicy {
    /// Legacy arithmetic, kept bit-for-bit: a zero-point grade reads as
    /// "no grade", credits parse by leading prefix, NaN flows into the sums.
    Source,
    /// "F" counts zero points with full credits; credits must parse cleanly
    /// and be finite and non-negative, otherwise the course is excluded.
    #[default]
    Corrected,
}

impl fmt::Display for FidelityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FidelityPolicy::Source => write!(f, "source"),
            FidelityPolicy::Corrected => write!(f, "corrected"),
        }
    }
}

impl FromStr for FidelityPolicy {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" | "fidelity" => Ok(FidelityPolicy::Source),
            "corrected" | "correct" => Ok(FidelityPolicy::Corrected),
            other => Err(GpaError::Config(format!("unknown policy: {other}"))),
        }
    }
}

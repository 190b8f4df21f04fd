//! Credit-weighted GPA aggregation.
//!
//! For each year the aggregator averages grade points weighted by credits,
//! scales the year GPA by the year's weight, and sums the scaled values into
//! the overall GPA. All four years are always reported.

use serde::{Deserialize, Serialize};

use crate::model::{CourseEntry, FidelityPolicy, Year};
use crate::roster::Roster;
use crate::tables::{GradeTable, YearWeights};

/// Result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    /// Sum of weighted year GPAs, rounded to 2 decimal places.
    pub overall_gpa: f64,
    /// One entry per year, ascending.
    pub breakdown: Vec<YearBreakdown>,
    /// Courses that contributed nothing, with the reason.
    #[serde(default)]
    pub excluded: Vec<Exclusion>,
    /// Policy the result was computed under.
    pub policy: FidelityPolicy,
}

/// Per-year line of a [`GpaResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBreakdown {
    pub year: Year,
    /// Credit-weighted year GPA, rounded to 2 decimal places.
    pub year_gpa: f64,
    /// `year_gpa * weight` before rounding, then rounded to 2 decimal places.
    pub weighted_year_gpa: f64,
    pub weight: f64,
    /// Credits that entered the year's average.
    pub credits: f64,
    /// Number of courses that entered the year's average.
    pub counted_courses: usize,
}

/// A course skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub course_id: usize,
    pub year: Year,
    pub reason: ExclusionReason,
}

/// Why a course was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No grade selected.
    Ungraded,
    /// The grade symbol is not in the grade-point table.
    UnknownGrade(String),
    /// Source policy only: a grade worth 0.0 points reads as "no grade".
    ZeroPointGrade(String),
    /// Corrected policy only: credits are not a finite, non-negative number.
    InvalidCredits(String),
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::Ungraded => write!(f, "no grade selected"),
            ExclusionReason::UnknownGrade(g) => write!(f, "unknown grade '{g}'"),
            ExclusionReason::ZeroPointGrade(g) => {
                write!(f, "grade '{g}' is worth 0 points and is skipped")
            }
            ExclusionReason::InvalidCredits(c) => write!(f, "invalid credits '{c}'"),
        }
    }
}

impl GpaResult {
    /// The breakdown line for `year`.
    pub fn year(&self, year: Year) -> Option<&YearBreakdown> {
        self.breakdown.iter().find(|b| b.year == year)
    }

    /// `true` when any reported figure is NaN. Only reachable under
    /// [`FidelityPolicy::Source`]; corrected totals that overflow fall back
    /// to a 0 year GPA instead.
    pub fn has_nan(&self) -> bool {
        self.overall_gpa.is_nan()
            || self
                .breakdown
                .iter()
                .any(|b| b.year_gpa.is_nan() || b.weighted_year_gpa.is_nan())
    }
}

/// Compute the weighted GPA of `roster`.
pub fn compute(
    roster: &Roster,
    grades: &GradeTable,
    weights: &YearWeights,
    policy: FidelityPolicy,
) -> GpaResult {
    let mut overall = 0.0;
    let mut breakdown = Vec::with_capacity(4);
    let mut excluded = Vec::new();

    for (year, weight) in weights.iter() {
        let mut total_points = 0.0;
        let mut total_credits = 0.0;
        let mut counted_courses = 0;

        for course in roster.for_year(year) {
            match contribution(course, grades, policy) {
                Ok((points, credits)) => {
                    total_points += points * credits;
                    total_credits += credits;
                    counted_courses += 1;
                }
                Err(reason) => {
                    tracing::debug!(id = course.id, %year, %reason, "course excluded");
                    excluded.push(Exclusion {
                        course_id: course.id,
                        year,
                        reason,
                    });
                }
            }
        }

        let year_gpa = if totals_usable(total_points, total_credits, policy) {
            total_points / total_credits
        } else {
            0.0
        };
        let weighted = year_gpa * weight;
        overall += weighted;

        tracing::debug!(%year, total_points, total_credits, year_gpa, weighted, "year aggregated");

        breakdown.push(YearBreakdown {
            year,
            year_gpa: round_for(policy, year_gpa),
            weighted_year_gpa: round_for(policy, weighted),
            weight,
            credits: total_credits,
            counted_courses,
        });
    }

    GpaResult {
        overall_gpa: round_for(policy, overall),
        breakdown,
        excluded,
        policy,
    }
}

/// Grade points and credits a course contributes, or why it contributes
/// nothing.
fn contribution(
    course: &CourseEntry,
    grades: &GradeTable,
    policy: FidelityPolicy,
) -> Result<(f64, f64), ExclusionReason> {
    let points = match grades.lookup(&course.grade) {
        Some(points) => points,
        None if course.grade.is_empty() => return Err(ExclusionReason::Ungraded),
        None => return Err(ExclusionReason::UnknownGrade(course.grade.clone())),
    };

    match policy {
        FidelityPolicy::Source => {
            if points == 0.0 {
                return Err(ExclusionReason::ZeroPointGrade(course.grade.clone()));
            }
            let credits = parse_credits_prefix(&course.credits);
            if credits.is_nan() {
                tracing::debug!(id = course.id, credits = %course.credits, "credits parse to NaN");
            }
            Ok((points, credits))
        }
        FidelityPolicy::Corrected => parse_credits_strict(&course.credits)
            .map(|credits| (points, credits))
            .ok_or_else(|| ExclusionReason::InvalidCredits(course.credits.clone())),
    }
}

/// Source policy divides only when the credit total is "truthy": zero and
/// NaN both fall back to a 0 year GPA. Corrected policy also refuses totals
/// that overflowed to infinity.
fn totals_usable(total_points: f64, total_credits: f64, policy: FidelityPolicy) -> bool {
    match policy {
        FidelityPolicy::Source => total_credits != 0.0 && !total_credits.is_nan(),
        FidelityPolicy::Corrected => {
            total_points.is_finite() && total_credits.is_finite() && total_credits > 0.0
        }
    }
}

/// Parse the longest numeric prefix of `text`, after leading whitespace.
///
/// `"3"` → 3, `"2.5 credits"` → 2.5, `"1e1x"` → 10, `"Infinity"` → ∞,
/// `""` / `"abc"` → NaN.
pub fn parse_credits_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the whole of `text` as a finite, non-negative number.
pub fn parse_credits_strict(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite() && *c >= 0.0)
}

/// Round to 2 decimal places. NaN and infinities pass through.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 2 decimal places from the exact binary value, ties away from
/// zero, so `3.925` (stored as `3.92499…`) becomes `3.92`.
pub fn round_exact2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // An exact tie at the third decimal is an odd multiple of 1/8, where
    // `value * 100` is exact and `round` already breaks ties away from zero.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return round2(value);
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

fn round_for(policy: FidelityPolicy, value: f64) -> f64 {
    match policy {
        FidelityPolicy::Source => round_exact2(value),
        FidelityPolicy::Corrected => round2(value),
    }
}

//! The grade-point and year-weight lookup tables.
//!
//! Both tables are validated once at construction and are immutable
//! afterwards. A session receives them at startup.

use serde::Serialize;

use crate::error::GpaError;
use crate::model::Year;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Highest grade point a symbol may carry.
pub const MAX_GRADE_POINT: f64 = 4.0;

/// Ordered mapping from grade symbol to grade point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeTable {
    entries: Vec<GradeEntry>,
}

/// One row of the grade-point table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeEntry {
    pub symbol: String,
    pub points: f64,
}

impl GradeTable {
    /// Build a table from `(symbol, points)` pairs, keeping their order.
    pub fn try_new<I, S>(entries: I) -> Result<Self, GpaError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut rows: Vec<GradeEntry> = Vec::new();
        for (symbol, points) in entries {
            let symbol = symbol.into();
            if symbol.trim().is_empty() {
                return Err(GpaError::InvalidGradeTable(
                    "grade symbol must not be empty".into(),
                ));
            }
            if rows.iter().any(|r| r.symbol == symbol) {
                return Err(GpaError::InvalidGradeTable(format!(
                    "duplicate grade symbol: {symbol}"
                )));
            }
            if !points.is_finite() || !(0.0..=MAX_GRADE_POINT).contains(&points) {
                return Err(GpaError::InvalidGradeTable(format!(
                    "grade {symbol} has points {points}, expected 0.0-{MAX_GRADE_POINT}"
                )));
            }
            rows.push(GradeEntry { symbol, points });
        }
        if rows.is_empty() {
            return Err(GpaError::InvalidGradeTable("table is empty".into()));
        }
        Ok(Self { entries: rows })
    }

    /// Explicit presence lookup. `Some(0.0)` is a real value, not "absent".
    pub fn lookup(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.points)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Grade symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        let entries = [
            ("A+", 4.0),
            ("A", 4.0),
            ("A-", 3.7),
            ("B+", 3.3),
            ("B", 3.0),
            ("B-", 2.7),
            ("C+", 2.3),
            ("C", 2.0),
            ("C-", 1.7),
            ("D+", 1.3),
            ("D", 1.0),
            ("F", 0.0),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(symbol, points)| GradeEntry {
                    symbol: symbol.to_string(),
                    points,
                })
                .collect(),
        }
    }
}

/// Weight of each academic year in the overall GPA. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearWeights {
    weights: [f64; 4],
}

impl YearWeights {
    /// Build from `(year, weight)` pairs. Every year must appear exactly
    /// once and the weights must sum to 1.0.
    pub fn try_new<I>(pairs: I) -> Result<Self, GpaError>
    where
        I: IntoIterator<Item = (Year, f64)>,
    {
        let mut slots: [Option<f64>; 4] = [None; 4];
        for (year, weight) in pairs {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(GpaError::InvalidYearWeights(format!(
                    "year {year} has weight {weight}, expected 0.0-1.0"
                )));
            }
            let slot = &mut slots[usize::from(year.get() - 1)];
            if slot.is_some() {
                return Err(GpaError::InvalidYearWeights(format!(
                    "year {year} listed more than once"
                )));
            }
            *slot = Some(weight);
        }

        let mut weights = [0.0; 4];
        for (year, slot) in Year::ALL.iter().zip(slots) {
            weights[usize::from(year.get() - 1)] = slot.ok_or_else(|| {
                GpaError::InvalidYearWeights(format!("missing weight for year {year}"))
            })?;
        }

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GpaError::InvalidYearWeights(format!(
                "weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(Self { weights })
    }

    pub fn weight(&self, year: Year) -> f64 {
        self.weights[usize::from(year.get() - 1)]
    }

    /// `(year, weight)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (Year, f64)> + '_ {
        Year::ALL.into_iter().map(|y| (y, self.weight(y)))
    }
}

impl Default for YearWeights {
    fn default() -> Self {
        Self {
            weights: [0.1, 0.2, 0.3, 0.4],
        }
    }
}

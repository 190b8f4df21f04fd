//! gpacalc-report — Rendering of grade tables, rosters, and GPA results.
//!
//! `text` renders terminal tables, `markdown` renders a shareable report,
//! and `json` serializes a computed snapshot.

pub mod json;
pub mod markdown;
pub mod text;

use gpacalc_core::tables::YearWeights;

/// Format a GPA figure to 2 decimal places. NaN renders as `NaN`.
pub fn format_gpa(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Format a weight fraction as a percentage, e.g. `0.3` → `30%`.
pub fn format_weight(weight: f64) -> String {
    let percent = (weight * 100.0 * 100.0).round() / 100.0;
    format!("{percent}%")
}

/// The sentence explaining how the overall GPA is weighted.
pub fn weighting_note(weights: &YearWeights) -> String {
    let parts: Vec<String> = weights
        .iter()
        .map(|(year, weight)| format!("{} for {} year", format_weight(weight), year.ordinal()))
        .collect();
    format!(
        "* The weighted GPA is calculated by taking each year's GPA, multiplying it by \
         the assigned weight ({}), and then summing them together.",
        parts.join(", ")
    )
}

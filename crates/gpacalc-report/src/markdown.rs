//! Markdown report.

use gpacalc_core::session::Snapshot;
use gpacalc_core::tables::YearWeights;

use crate::{format_gpa, format_weight, weighting_note};

/// Render a computed snapshot as markdown.
pub fn generate_markdown(snapshot: &Snapshot, weights: &YearWeights) -> String {
    let result = &snapshot.result;
    let mut md = String::new();

    md.push_str("## GPA Report\n\n");
    md.push_str(&format!(
        "**Weighted GPA:** {} _(policy: {}, computed {})_\n\n",
        format_gpa(result.overall_gpa),
        result.policy,
        snapshot.computed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("### GPA Breakdown\n\n");
    md.push_str("| Year | Year GPA | Weighted GPA for Year | Weight |\n");
    md.push_str("|------|----------|-----------------------|--------|\n");
    for line in &result.breakdown {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            line.year,
            format_gpa(line.year_gpa),
            format_gpa(line.weighted_year_gpa),
            format_weight(line.weight)
        ));
    }
    md.push('\n');

    if !result.excluded.is_empty() {
        md.push_str("### Excluded Courses\n\n");
        for exclusion in &result.excluded {
            md.push_str(&format!(
                "- course {} (year {}): {}\n",
                exclusion.course_id, exclusion.year, exclusion.reason
            ));
        }
        md.push('\n');
    }

    md.push_str(&weighting_note(weights).replacen('*', "\\*", 1));
    md.push('\n');
    md
}

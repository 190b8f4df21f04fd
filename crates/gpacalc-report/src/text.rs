//! Terminal rendering with comfy-table.

use comfy_table::{Cell, CellAlignment, Table};

use gpacalc_core::aggregator::GpaResult;
use gpacalc_core::model::Year;
use gpacalc_core::roster::Roster;
use gpacalc_core::tables::{GradeTable, YearWeights};

use crate::{format_gpa, format_weight, weighting_note};

/// The grade-point reference table.
pub fn grade_table(grades: &GradeTable) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Grade", "Grade Point"]);
    for entry in grades.iter() {
        table.add_row(vec![
            Cell::new(&entry.symbol).set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.1}", entry.points)).set_alignment(CellAlignment::Center),
        ]);
    }
    table.to_string()
}

/// The year-weight table.
pub fn year_weights(weights: &YearWeights) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Year", "Weight"]);
    for (year, weight) in weights.iter() {
        table.add_row(vec![
            Cell::new(format!("Year {year}")),
            Cell::new(format_weight(weight)),
        ]);
    }
    table.to_string()
}

/// The roster, one section per year.
pub fn roster(roster: &Roster) -> String {
    let mut out = String::new();
    for year in Year::ALL {
        out.push_str(&format!("Year {year}\n"));
        let mut courses = roster.for_year(year).peekable();
        if courses.peek().is_none() {
            out.push_str("  (no courses)\n");
            continue;
        }
        let mut table = Table::new();
        table.set_header(vec!["ID", "Grade", "Credits"]);
        for course in courses {
            let grade = if course.has_grade() {
                course.grade.as_str()
            } else {
                "-"
            };
            table.add_row(vec![
                Cell::new(course.id),
                Cell::new(grade),
                Cell::new(&course.credits),
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out
}

/// The overall GPA, the per-year breakdown, exclusions, and the weighting
/// note. `stale` marks a result computed before the latest roster edits.
pub fn result(result: &GpaResult, weights: &YearWeights, stale: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Weighted GPA: {}", format_gpa(result.overall_gpa)));
    if stale {
        out.push_str("  (stale: roster changed since last compute)");
    }
    out.push('\n');

    let mut table = Table::new();
    table.set_header(vec!["Year", "Year GPA", "Weighted GPA for Year", "Weight"]);
    for line in &result.breakdown {
        table.add_row(vec![
            Cell::new(format!("Year {}", line.year)),
            Cell::new(format_gpa(line.year_gpa)).set_alignment(CellAlignment::Right),
            Cell::new(format_gpa(line.weighted_year_gpa)).set_alignment(CellAlignment::Right),
            Cell::new(format_weight(line.weight)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    if !result.excluded.is_empty() {
        out.push_str("Excluded courses:\n");
        for exclusion in &result.excluded {
            out.push_str(&format!(
                "  #{} (year {}): {}\n",
                exclusion.course_id, exclusion.year, exclusion.reason
            ));
        }
    }

    if result.has_nan() {
        out.push_str("NaN: a year's credits could not be divided\n");
    }
    out.push_str(&format!("Policy: {}\n", result.policy));
    out.push_str(&weighting_note(weights));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpacalc_core::aggregator::compute;
    use gpacalc_core::model::{CourseUpdate, FidelityPolicy};

    fn add_graded(roster: &mut Roster, year: Year, grade: &str, credits: &str) {
        let id = roster.add(year);
        let grade = CourseUpdate::SetGrade(grade.into());
        let credits = CourseUpdate::SetCredits(credits.into());
        roster.edit(id, grade).unwrap();
        roster.edit(id, credits).unwrap();
    }

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        add_graded(&mut roster, Year::FIRST, "A", "3");
        add_graded(&mut roster, Year::FIRST, "B", "3");
        roster.add(Year::THIRD);
        roster
    }

    #[test]
    fn grade_table_lists_symbols_and_points() {
        let out = grade_table(&GradeTable::default());
        assert!(out.contains("Grade Point"));
        assert!(out.contains("A+"));
        assert!(out.contains("3.7"));
        assert!(out.contains("0.0"));
    }

    #[test]
    fn weights_table_shows_percentages() {
        let out = year_weights(&YearWeights::default());
        assert!(out.contains("Year 4"));
        assert!(out.contains("40%"));
    }

    #[test]
    fn roster_groups_by_year() {
        let out = roster(&sample_roster());
        let year1 = out.find("Year 1").unwrap();
        let year2 = out.find("Year 2").unwrap();
        let year3 = out.find("Year 3").unwrap();
        assert!(year1 < year2 && year2 < year3);
        assert!(out[year2..year3].contains("(no courses)"));
        assert!(out[year3..].contains('-'));
    }

    #[test]
    fn result_shows_breakdown_and_note() {
        let weights = YearWeights::default();
        let computed = compute(
            &sample_roster(),
            &GradeTable::default(),
            &weights,
            FidelityPolicy::Corrected,
        );
        let out = result(&computed, &weights, false);
        assert!(out.starts_with("Weighted GPA: 0.35\n"));
        assert!(out.contains("3.50"));
        assert!(out.contains("Weighted GPA for Year"));
        assert!(out.contains("Excluded courses:"));
        assert!(out.contains("#2 (year 3): no grade selected"));
        assert!(out.contains("Policy: corrected"));
        assert!(out.contains("10% for 1st year"));
        assert!(!out.contains("stale"));
    }

    #[test]
    fn stale_result_is_flagged() {
        let weights = YearWeights::default();
        let computed = compute(
            &Roster::new(),
            &GradeTable::default(),
            &weights,
            FidelityPolicy::Source,
        );
        let out = result(&computed, &weights, true);
        assert!(out.contains("(stale"));
        assert!(!out.contains("Excluded courses"));
        assert!(!out.contains("could not be divided"));
    }

    #[test]
    fn nan_result_carries_a_note() {
        let mut roster = Roster::new();
        add_graded(&mut roster, Year::SECOND, "A", "Infinity");
        let weights = YearWeights::default();
        let computed = compute(
            &roster,
            &GradeTable::default(),
            &weights,
            FidelityPolicy::Source,
        );
        let out = result(&computed, &weights, false);
        assert!(out.starts_with("Weighted GPA: NaN\n"));
        assert!(out.contains("could not be divided"));
    }
}

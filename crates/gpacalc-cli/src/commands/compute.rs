//! The `gpacalc compute` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gpacalc_core::model::{CourseUpdate, Year};
use gpacalc_core::session::Session;
use gpacalc_report::json::GpaDocument;
use gpacalc_report::{markdown, text};

/// A course given on the command line.
#[derive(Debug, PartialEq)]
struct CourseSpec {
    year: Year,
    grade: String,
    credits: String,
}

/// Parse `YEAR:GRADE:CREDITS`. Grade and credits may be empty; credits are
/// kept verbatim so the aggregation policy decides what they mean.
fn parse_course_spec(spec: &str) -> Result<CourseSpec> {
    let mut parts = spec.splitn(3, ':');
    let year = parts.next().unwrap_or_default();
    let (Some(grade), Some(credits)) = (parts.next(), parts.next()) else {
        anyhow::bail!("invalid course '{spec}', expected YEAR:GRADE:CREDITS");
    };
    let year: Year = year
        .parse()
        .with_context(|| format!("invalid course '{spec}'"))?;
    Ok(CourseSpec {
        year,
        grade: grade.trim().to_string(),
        credits: credits.to_string(),
    })
}

fn apply(session: &mut Session, course: CourseSpec) -> Result<()> {
    let id = session.add_course(course.year);
    session.edit_course(id, CourseUpdate::SetGrade(course.grade))?;
    session.edit_course(id, CourseUpdate::SetCredits(course.credits))?;
    Ok(())
}

pub fn execute(
    course_specs: Vec<String>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let courses = course_specs
        .iter()
        .map(|s| parse_course_spec(s))
        .collect::<Result<Vec<_>>>()?;

    let mut session = super::load_session(config_path.as_deref())?;
    for course in courses {
        apply(&mut session, course)?;
    }

    let result = session.compute();
    tracing::info!(overall = result.overall_gpa, "computed");

    let document =
        GpaDocument::from_session(&session).context("no result available after compute")?;

    match format.as_str() {
        "json" => println!("{}", document.to_json_pretty()?),
        "markdown" | "md" => {
            let snapshot = session
                .snapshot()
                .context("no result available after compute")?;
            println!(
                "{}",
                markdown::generate_markdown(snapshot, session.weights())
            );
        }
        "text" => print!("{}", text::result(&result, session.weights(), false)),
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown)"),
    }

    if let Some(path) = output {
        document.save_json(&path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}

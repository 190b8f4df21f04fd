//! The `gpacalc session` command.
//!
//! A line-oriented session: each input line is one user action against the
//! roster, and `compute` refreshes the displayed result.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use gpacalc_core::error::GpaError;
use gpacalc_core::model::{CourseUpdate, Year};
use gpacalc_core::session::Session;
use gpacalc_report::text;

const HELP: &str = "\
Commands:
  add <year>             add a course to year 1-4
  grade <id> <grade>     set a course's grade (- to clear)
  credits <id> <value>   set a course's credits (- to clear)
  compute                calculate the weighted GPA
  show                   show the roster and the last result
  table                  show the grade-point table and year weights
  help                   show this help
  quit                   leave the session";

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Add(Year),
    Grade(usize, String),
    Credits(usize, String),
    Compute,
    Show,
    Table,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_lowercase().as_str() {
        "add" => SessionCommand::Add(rest.parse().context("usage: add <year>")?),
        "grade" => {
            let (id, value) = id_and_value(rest).context("usage: grade <id> <grade>")?;
            SessionCommand::Grade(id, value)
        }
        "credits" => {
            let (id, value) = id_and_value(rest).context("usage: credits <id> <value>")?;
            SessionCommand::Credits(id, value)
        }
        "compute" | "calc" => SessionCommand::Compute,
        "show" => SessionCommand::Show,
        "table" | "grades" => SessionCommand::Table,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => anyhow::bail!("unknown command: {other} (try `help`)"),
    };
    Ok(Some(command))
}

/// Split `<id> <value>`; a lone `-` value means "empty".
fn id_and_value(rest: &str) -> Result<(usize, String)> {
    let (id, value) = rest
        .split_once(char::is_whitespace)
        .context("missing value")?;
    let id = id
        .parse::<usize>()
        .with_context(|| format!("invalid course id: {id}"))?;
    let value = match value.trim() {
        "-" => String::new(),
        v => v.to_string(),
    };
    Ok((id, value))
}

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = super::load_session(config_path.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(session, stdin.lock(), stdout.lock())
}

/// Drive `session` from `input` until `quit` or end of input.
fn run<R: BufRead, W: Write>(mut session: Session, input: R, mut out: W) -> Result<()> {
    writeln!(
        out,
        "gpacalc session (policy: {}). Type `help` for commands.",
        session.policy()
    )?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        if let Err(e) = dispatch(&mut session, command, &mut out) {
            match e.downcast_ref::<GpaError>() {
                Some(err) if !err.is_input_error() => return Err(e),
                _ => writeln!(out, "error: {e:#}")?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn dispatch<W: Write>(session: &mut Session, command: SessionCommand, out: &mut W) -> Result<()> {
    match command {
        SessionCommand::Add(year) => {
            let id = session.add_course(year);
            writeln!(out, "Added course {id} to year {year}")?;
        }
        SessionCommand::Grade(id, grade) => {
            session.edit_course(id, CourseUpdate::SetGrade(grade.clone()))?;
            if grade.is_empty() {
                writeln!(out, "Course {id}: grade -")?;
            } else if session.grades().contains(&grade) {
                writeln!(out, "Course {id}: grade {grade}")?;
            } else {
                let choices: Vec<&str> = session.grades().symbols().collect();
                writeln!(
                    out,
                    "Course {id}: grade {grade} (not in the grade table: {})",
                    choices.join(", ")
                )?;
            }
        }
        SessionCommand::Credits(id, credits) => {
            let course = session.edit_course(id, CourseUpdate::SetCredits(credits))?;
            writeln!(out, "Course {id}: credits {}", course.credits)?;
        }
        SessionCommand::Compute => {
            let result = session.compute();
            write!(out, "{}", text::result(&result, session.weights(), false))?;
        }
        SessionCommand::Show => {
            write!(out, "{}", text::roster(session.roster()))?;
            match session.result() {
                Some(result) => write!(
                    out,
                    "{}",
                    text::result(result, session.weights(), session.is_stale())
                )?,
                None => writeln!(out, "No result yet. Run `compute`.")?,
            }
        }
        SessionCommand::Table => {
            writeln!(out, "{}", text::grade_table(session.grades()))?;
            writeln!(out, "{}", text::year_weights(session.weights()))?;
        }
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(input: &str) -> String {
        let mut out = Vec::new();
        run(Session::default(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_known_commands() {
        assert_eq!(
            parse_command("add 2").unwrap(),
            Some(SessionCommand::Add(Year::SECOND))
        );
        assert_eq!(
            parse_command("  grade 0 B+ ").unwrap(),
            Some(SessionCommand::Grade(0, "B+".into()))
        );
        assert_eq!(
            parse_command("grade 3 -").unwrap(),
            Some(SessionCommand::Grade(3, String::new()))
        );
        assert_eq!(
            parse_command("credits 1 2 credits").unwrap(),
            Some(SessionCommand::Credits(1, "2 credits".into()))
        );
        assert_eq!(
            parse_command("COMPUTE").unwrap(),
            Some(SessionCommand::Compute)
        );
        assert_eq!(parse_command("exit").unwrap(), Some(SessionCommand::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn parse_rejects_malformed_commands() {
        assert!(parse_command("add 7").is_err());
        assert!(parse_command("add").is_err());
        assert!(parse_command("grade x A").is_err());
        assert!(parse_command("credits 0").is_err());
        assert!(parse_command("delete 0").is_err());
    }

    #[test]
    fn full_session_computes_weighted_gpa() {
        let script = "add 1\nadd 1\ngrade 0 A\ncredits 0 3\ngrade 1 B\ncredits 1 3\ncompute\n";
        let out = transcript(script);
        assert!(out.contains("Added course 0 to year 1"));
        assert!(out.contains("Added course 1 to year 1"));
        assert!(out.contains("Weighted GPA: 0.35"));
        assert!(out.contains("3.50"));
    }

    #[test]
    fn show_before_compute_reports_idle() {
        let out = transcript("add 3\nshow\n");
        assert!(out.contains("Year 3"));
        assert!(out.contains("No result yet"));
    }

    #[test]
    fn show_flags_stale_result() {
        let out = transcript("add 1\ngrade 0 A\ncredits 0 3\ncompute\ngrade 0 C\nshow\n");
        assert!(out.contains("Weighted GPA: 0.40  (stale"));
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let out = transcript("grade 4 A\nfrobnicate\nadd 9\nadd 4\n");
        assert!(out.contains("error: unknown course id: 4"));
        assert!(out.contains("error: unknown command: frobnicate"));
        assert!(out.contains("invalid year: 9"));
        assert!(out.contains("Added course 0 to year 4"));
    }

    #[test]
    fn known_grade_reply_has_no_hint() {
        let out = transcript("add 1\ngrade 0 B+\ngrade 0 -\n");
        assert!(out.contains("Course 0: grade B+\n"));
        assert!(out.contains("Course 0: grade -\n"));
        assert!(!out.contains("not in the grade table"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = transcript("quit\nadd 1\n");
        assert!(!out.contains("Added course"));
    }

    #[test]
    fn unknown_grades_are_accepted_and_reported_at_compute() {
        let out = transcript("add 2\ngrade 0 Z\ncredits 0 3\ncompute\n");
        assert!(out.contains("Course 0: grade Z (not in the grade table: A+, A, A-,"));
        assert!(out.contains("unknown grade 'Z'"));
    }
}

//! The `gpacalc grades` command.

use std::path::PathBuf;

use anyhow::Result;

use gpacalc_report::{text, weighting_note};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = super::load_session(config_path.as_deref())?;

    println!("Grade Points Table");
    println!("{}", text::grade_table(session.grades()));
    println!("\nYear Weights");
    println!("{}", text::year_weights(session.weights()));
    println!("\nPolicy: {}", session.policy());
    println!("{}", weighting_note(session.weights()));

    Ok(())
}

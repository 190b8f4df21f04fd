//! The `gpacalc init` command.

use std::path::Path;

use anyhow::Result;

use gpacalc_core::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to pick a policy or change the tables");
    println!("  2. Run: gpacalc grades");
    println!("  3. Run: gpacalc session");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gpacalc configuration

# "corrected": an F counts 0 points with full credits, and courses whose
#              credits are not a plain non-negative number are excluded.
# "source":    an F is skipped entirely and credits are read by leading
#              number, so "" poisons the year and collapses it to 0.
policy = "corrected"

# Uncomment to replace the default grade-point table (order is kept).
# [[grades]]
# symbol = "A"
# points = 4.0

# Uncomment to replace the year weights. All four years are required and
# the weights must sum to 1.0.
# [[year_weights]]
# year = 1
# weight = 0.1
#
# [[year_weights]]
# year = 2
# weight = 0.2
#
# [[year_weights]]
# year = 3
# weight = 0.3
#
# [[year_weights]]
# year = 4
# weight = 0.4
"#;

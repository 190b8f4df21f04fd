//! gpacalc CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gpacalc", version, about = "Year-weighted GPA calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (reads commands from stdin)
    Session {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compute the weighted GPA for a list of courses
    Compute {
        /// Course as YEAR:GRADE:CREDITS, e.g. "1:A:3" (repeatable)
        #[arg(long = "course", value_name = "YEAR:GRADE:CREDITS")]
        courses: Vec<String>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also save the result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the grade-point table and year weights
    Grades {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter gpacalc.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Session { config } => commands::session::execute(config),
        Commands::Compute {
            courses,
            format,
            output,
            config,
        } => commands::compute::execute(courses, format, output, config),
        Commands::Grades { config } => commands::grades::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

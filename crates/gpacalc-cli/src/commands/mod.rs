//! Subcommand implementations.

pub mod compute;
pub mod grades;
pub mod init;
pub mod session;

use std::path::Path;

use anyhow::{Context, Result};

use gpacalc_core::config::load_config_from;
use gpacalc_core::session::Session;

/// Load the configuration and start an empty session with its tables.
fn load_session(config_path: Option<&Path>) -> Result<Session> {
    let config = load_config_from(config_path)?;
    tracing::debug!(policy = %config.policy, "configuration loaded");
    config.session().context("invalid grade or weight tables")
}

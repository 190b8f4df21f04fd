//! Calculator configuration.
//!
//! The configuration selects the aggregation policy and may replace the
//! default grade-point and year-weight tables. Tables are validated when
//! the configuration is turned into a [`Session`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GpaError;
use crate::model::{FidelityPolicy, Year};
use crate::session::Session;
use crate::tables::{GradeTable, YearWeights};

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = "gpacalc.toml";

/// Environment variable that overrides the configured policy.
pub const POLICY_ENV_VAR: &str = "GPACALC_POLICY";

/// Top-level gpacalc configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaConfig {
    /// How failing grades and malformed credits are aggregated.
    #[serde(default)]
    pub policy: FidelityPolicy,
    /// Replacement grade-point table, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grades: Option<Vec<GradeRow>>,
    /// Replacement year weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_weights: Option<Vec<WeightRow>>,
}

/// One `[[grades]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRow {
    pub symbol: String,
    pub points: f64,
}

/// One `[[year_weights]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRow {
    pub year: Year,
    pub weight: f64,
}

impl GpaConfig {
    /// Build the grade-point table, falling back to the default one.
    pub fn grade_table(&self) -> Result<GradeTable, GpaError> {
        match &self.grades {
            Some(rows) => GradeTable::try_new(rows.iter().map(|r| (r.symbol.clone(), r.points))),
            None => Ok(GradeTable::default()),
        }
    }

    /// Build the year-weight table, falling back to the default one.
    pub fn year_weights(&self) -> Result<YearWeights, GpaError> {
        match &self.year_weights {
            Some(rows) => YearWeights::try_new(rows.iter().map(|r| (r.year, r.weight))),
            None => Ok(YearWeights::default()),
        }
    }

    /// A fresh session using this configuration's tables and policy.
    pub fn session(&self) -> Result<Session, GpaError> {
        Ok(Session::new(
            self.grade_table()?,
            self.year_weights()?,
            self.policy,
        ))
    }

    /// Apply overrides from a variable lookup (normally the process
    /// environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), GpaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup(POLICY_ENV_VAR) {
            self.policy = policy.parse()?;
            tracing::debug!(policy = %self.policy, "policy overridden from environment");
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `gpacalc.toml` in the current directory
/// 2. `~/.config/gpacalc/config.toml`
///
/// Environment variable override: `GPACALC_POLICY`.
pub fn load_config_from(path: Option<&Path>) -> Result<GpaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_file(&path)?
        }
        None => GpaConfig::default(),
    };

    config
        .apply_overrides(|name| std::env::var(name).ok())
        .context("invalid environment override")?;

    Ok(config)
}

/// Read and validate one config file.
pub fn parse_config_file(path: &Path) -> Result<GpaConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config_str(&content, path)
}

/// Parse a TOML string into a config, checking that its tables are valid.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<GpaConfig> {
    let config: GpaConfig = toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))?;
    config
        .session()
        .with_context(|| format!("invalid tables in {}", source_path.display()))?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gpacalc"))
}

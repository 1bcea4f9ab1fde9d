//! Checker configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matcher::DEFAULT_TOLERANCE;
use crate::rational::Rational;
use crate::synonyms::{SynonymGroup, SynonymTable};

/// Environment variable overriding the numeric tolerance.
pub const TOLERANCE_ENV: &str = "SKILLCHECK_TOLERANCE";

/// Top-level skillcheck configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Numeric tolerance, written as a rational string (`"1/1000000"`, `"0.001"`).
    #[serde(default = "default_tolerance")]
    pub tolerance: Rational,
    /// Treat bare comma lists as ordered.
    #[serde(default)]
    pub ordered_lists: bool,
    /// Compare tokens without regard to case.
    #[serde(default = "default_true")]
    pub case_insensitive_tokens: bool,
    /// Drop the built-in synonym groups and use only `synonyms`.
    #[serde(default)]
    pub replace_default_synonyms: bool,
    /// Extra synonym groups.
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
    /// Output directory for grading reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_tolerance() -> Rational {
    DEFAULT_TOLERANCE
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./skillcheck-results")
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            ordered_lists: false,
            case_insensitive_tokens: true,
            replace_default_synonyms: false,
            synonyms: Vec::new(),
            output_dir: default_output_dir(),
        }
    }
}

impl CheckerConfig {
    /// Build the synonym table this configuration describes.
    pub fn synonym_table(&self) -> Arc<SynonymTable> {
        let mut table = if self.replace_default_synonyms {
            SynonymTable::empty(self.case_insensitive_tokens)
        } else {
            SynonymTable::builtin(self.case_insensitive_tokens)
        };
        for group in &self.synonyms {
            table.add_group(group);
        }
        Arc::new(table)
    }

    fn apply_tolerance_override(&mut self, raw: Option<String>) -> Result<()> {
        if let Some(raw) = raw {
            let tolerance: Rational = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {TOLERANCE_ENV} value: {raw:?}"))?;
            anyhow::ensure!(
                !tolerance.is_negative(),
                "{TOLERANCE_ENV} must not be negative, got {raw:?}"
            );
            self.tolerance = tolerance;
        }
        Ok(())
    }
}

/// Parse a configuration document.
pub fn parse_config_str(content: &str) -> Result<CheckerConfig> {
    let config: CheckerConfig = toml::from_str(content).context("failed to parse config")?;
    anyhow::ensure!(
        !config.tolerance.is_negative(),
        "tolerance must not be negative, got {}",
        config.tolerance
    );
    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `skillcheck.toml` in the current directory
/// 2. `~/.config/skillcheck/config.toml`
///
/// Environment variable override: `SKILLCHECK_TOLERANCE`.
pub fn load_config() -> Result<CheckerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CheckerConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("skillcheck.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to load config: {}", path.display()))?
        }
        None => CheckerConfig::default(),
    };

    config.apply_tolerance_override(std::env::var(TOLERANCE_ENV).ok())?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("skillcheck"))
}

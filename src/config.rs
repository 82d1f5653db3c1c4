//! Stage Configuration
//!
//! Loads the staging policy from TOML. Configuration includes:
//! - Overflow policy (reject, overwrite, truncate)
//! - High watermark for fill-level warnings
//! - Per-batch trace events toggle
//!
//! Values come from an explicit path, else `static-fifo.toml` in the working
//! directory, else defaults. `STATIC_FIFO_OVERFLOW` overrides the policy.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FifoError;

/// Config file picked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "static-fifo.toml";

/// Environment variable overriding [`StageConfig::overflow`].
pub const OVERFLOW_ENV_VAR: &str = "STATIC_FIFO_OVERFLOW";

/// What a stage does with a batch that does not fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Refuse the whole batch (default)
    #[default]
    Reject,
    /// Evict the oldest elements to make room
    Overwrite,
    /// Keep the prefix that fits, refuse the rest
    Truncate,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Reject => write!(f, "reject"),
            OverflowPolicy::Overwrite => write!(f, "overwrite"),
            OverflowPolicy::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = FifoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "overwrite" => Ok(OverflowPolicy::Overwrite),
            "truncate" => Ok(OverflowPolicy::Truncate),
            other => Err(FifoError::InvalidConfig(format!(
                "unknown overflow policy '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default)]
    pub overflow: OverflowPolicy,
    /// Fill ratio (0.0 - 1.0) above which the stage warns
    #[serde(default = "default_high_watermark")]
    pub high_watermark: f64,
    /// Emit a debug event for every rejected or overwritten batch
    #[serde(default = "default_true")]
    pub trace_events: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            high_watermark: default_high_watermark(),
            trace_events: true,
        }
    }
}

fn default_high_watermark() -> f64 {
    0.75
}
fn default_true() -> bool {
    true
}

impl StageConfig {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let env_override = std::env::var(OVERFLOW_ENV_VAR).ok();
        Self::load_with_override(path, env_override.as_deref())
    }

    /// [`load`](Self::load) with the `STATIC_FIFO_OVERFLOW` value passed in.
    pub fn load_with_override(path: Option<&str>, overflow_override: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read stage config from {}", p))?;
                toml::from_str(&content).context("Failed to parse stage config")?
            }
            None => match read_optional(DEFAULT_CONFIG_PATH)? {
                Some(content) => toml::from_str(&content).context("Failed to parse stage config")?,
                None => {
                    tracing::debug!("No stage config file found, using defaults");
                    Self::default()
                }
            },
        };

        let config = config.with_overflow_override(overflow_override)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate an in-memory TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse stage config")?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the overflow policy when `raw` is set.
    pub fn with_overflow_override(mut self, raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw {
            self.overflow = raw
                .parse::<OverflowPolicy>()
                .with_context(|| format!("Invalid {} value", OVERFLOW_ENV_VAR))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> std::result::Result<(), FifoError> {
        if !(0.0..=1.0).contains(&self.high_watermark) {
            return Err(FifoError::InvalidConfig(format!(
                "high_watermark must be within 0.0..=1.0, got {}",
                self.high_watermark
            )));
        }
        Ok(())
    }
}

/// Read `path`, treating only a missing file as absent.
fn read_optional(path: &str) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read stage config from {}", path)),
    }
}

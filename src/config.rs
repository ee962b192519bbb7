//! Configuration for the seqflow CLI.
//!
//! Loaded from an explicit path, `.seqflow.yml`, or ~/.config/seqflow/seqflow.yml,
//! falling back to defaults. Numbers are read as signed integers so that a
//! negative value is reported as an invalid argument instead of a parse error.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use seqflow::{RetryPolicy, SeqflowError, interval_from_millis};

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRY_TIMES: i64 = 3;

/// Default wait between attempts, in milliseconds.
pub const DEFAULT_INTERVAL_MS: i64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
    pub retry: RetryConfig,
    pub forever: ForeverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            retry: RetryConfig::default(),
            forever: ForeverConfig::default(),
        }
    }
}

/// Bounded retry defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub times: i64,
    #[serde(rename = "interval-ms")]
    pub interval_ms: i64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            times: DEFAULT_RETRY_TIMES,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Retry-forever defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeverConfig {
    #[serde(rename = "interval-ms")]
    pub interval_ms: i64,
}

impl Default for ForeverConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .seqflow.yml in current directory
    /// 3. ~/.config/seqflow/seqflow.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".seqflow.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .seqflow.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .seqflow.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("seqflow").join("seqflow.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> seqflow::Result<()> {
        self.retry_policy(None, None)
            .map_err(|e| SeqflowError::Config(format!("retry: {}", e)))?;
        self.forever_interval(None)
            .map_err(|e| SeqflowError::Config(format!("forever: {}", e)))?;
        Ok(())
    }

    /// Bounded retry policy, with CLI overrides applied on top of the file values.
    pub fn retry_policy(&self, times: Option<i64>, interval_ms: Option<i64>) -> seqflow::Result<RetryPolicy> {
        RetryPolicy::from_millis(
            times.unwrap_or(self.retry.times),
            interval_ms.unwrap_or(self.retry.interval_ms),
        )
    }

    /// Retry-forever interval, with an optional CLI override.
    pub fn forever_interval(&self, interval_ms: Option<i64>) -> seqflow::Result<Duration> {
        interval_from_millis(interval_ms.unwrap_or(self.forever.interval_ms))
    }
}

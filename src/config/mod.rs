//! # Configuration Management Module
//!
//! Lady Black reads a small TOML file that chooses where riddles come from,
//! how the console paces its text and where log records go. Every section
//! and field has a default, so a partial file (or no file at all) is valid.
//!
//! ## Configuration Structure
//!
//! - [`OracleConfig`] - which backend answers riddle/hint/judge requests
//! - [`DisplayConfig`] - word-wrap column, pacing multiplier, colour
//! - [`LoggingConfig`] - log level and log file
//!
//! ## Configuration File Format
//!
//! ```toml
//! [oracle]
//! backend = "anthropic"
//! api_key_env = "ANTHROPIC_API_KEY"
//!
//! [display]
//! pacing = 0.5
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ladyblack::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("ladyblack.toml").await?;
//!     println!("Backend: {:?}", config.oracle.backend);
//!     Config::create_default("ladyblack.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! CLI flags override file values; file values override defaults.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which service answers the three oracle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    /// A riddle server exposing `/api/question`, `/api/hint` and `/api/validate`.
    Http,
    /// The Anthropic Messages API, called directly.
    Anthropic,
}

impl std::str::FromStr for OracleBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(OracleBackend::Http),
            "anthropic" | "claude" => Ok(OracleBackend::Anthropic),
            other => Err(anyhow!("unknown oracle backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub backend: OracleBackend,
    /// Root of the riddle server for the `http` backend.
    pub base_url: String,
    /// Name of the environment variable holding the Anthropic API key.
    pub api_key_env: String,
    pub anthropic_url: String,
    pub riddle_model: String,
    pub hint_model: String,
    /// Model used to judge near-miss guesses (synonyms, spelling variants).
    pub judge_model: String,
    /// Optional request timeout. Unset means the transport's own behaviour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::Http,
            base_url: "http://localhost:3001".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            anthropic_url: "https://api.anthropic.com/v1/messages".to_string(),
            riddle_model: "claude-sonnet-4-6".to_string(),
            hint_model: "claude-sonnet-4-6".to_string(),
            judge_model: "claude-haiku-4-5-20251001".to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Column at which riddle and hint text is wrapped.
    pub wrap_width: usize,
    /// Multiplier on every narration delay; 0 renders instantly.
    pub pacing: f64,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            wrap_width: 58,
            pacing: 1.0,
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file. When unset, records go to stderr.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("ladyblack.log".to_string()),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path).await
        } else {
            Ok(Config::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

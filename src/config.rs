//! Runtime configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Command-line flags in the binary override whatever is loaded here.

use dotenv::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::env as keys;
use crate::error::{Error, Result};
use crate::lyrics::UnterminatedPolicy;

/// How the CLI prints assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON array of `{cell_index, syllable}` per line.
    #[default]
    Json,
    /// A `\lyricmode` block per line.
    Lilypond,
}

impl OutputFormat {
    /// Returns the configuration name of this format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Lilypond => "lilypond",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "lilypond" | "ly" => Ok(Self::Lilypond),
            other => Err(Error::config(
                format!("unknown output format `{other}`"),
                "Use `json` or `lilypond`",
            )),
        }
    }
}

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Policy for slurs that never close
    pub unterminated: UnterminatedPolicy,
    /// Output format for the CLI
    pub format: OutputFormat,
    /// Default input document; stdin when absent
    pub input: Option<PathBuf>,
    /// Log filter directive, if set
    pub log_filter: Option<String>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            unterminated: UnterminatedPolicy::default(),
            format: OutputFormat::default(),
            input: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(policy) = lookup(keys::UNTERMINATED) {
            config.unterminated = policy.parse()?;
        }

        if let Some(format) = lookup(keys::FORMAT) {
            config.format = format.parse()?;
        }

        config.input = lookup(keys::INPUT)
            .filter(|path| !path.trim().is_empty())
            .map(|path| PathBuf::from(shellexpand::tilde(&path).to_string()));

        config.log_filter = lookup(keys::LOG).filter(|filter| !filter.trim().is_empty());

        Ok(config)
    }
}

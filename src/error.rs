//! Library error types.
//!
//! Distribution itself never fails on odd input (it truncates silently);
//! these variants cover caller contract violations and the CLI surface.

use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types with enough context to point at the caller's mistake
#[derive(Debug, Error)]
pub enum Error {
    /// A value of the wrong shape was passed across a dynamic boundary
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A slur start was never closed before the line ended
    #[error("Unterminated melisma starting at cell {start}")]
    UnterminatedMelisma {
        /// Index of the `SlurStart` cell that opened the melisma.
        start: usize,
    },

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Input document could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create an invalid-argument error for the named parameter
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument { argument, message: message.into() }
    }

    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn invalid_argument_names_the_parameter() {
        let err = Error::invalid_argument("cells", "expected an array, got string");
        assert_eq!(
            err.to_string(),
            "Invalid argument `cells`: expected an array, got string"
        );
    }

    #[test]
    fn config_error_carries_hint() {
        let err = Error::config("unknown format `xml`", "Use `json` or `lilypond`");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("lilypond")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io(source, std::path::PathBuf::from("line.json"));
        assert!(err.to_string().contains("line.json"));
    }
}

//! Error types for the keystroke sanitization pipeline.
//!
//! The core is deliberately fail-safe within a session: malformed events
//! replay as no-ops and ambiguous provenance widens redaction instead of
//! raising. The variants here cover what remains genuinely fatal:
//! unreadable files, malformed JSON, invalid configuration.

use thiserror::Error;

/// Result type alias for sanitization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration file or value errors.
    Config,
    /// Secret list or session log input errors.
    Input,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the sanitization pipeline.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Input errors (20-29)
    #[error("invalid secret list: {0}")]
    SecretList(String),

    #[error("invalid session log {path}: {reason}")]
    SessionLog { path: String, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category: 10-19 config, 20-29 input,
    /// 60-69 I/O.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::SecretList(_) => 20,
            Error::SessionLog { .. } => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::SecretList(_) | Error::SessionLog { .. } => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Process exit code for the CLI: 2 for usage/configuration
    /// problems the user can fix on the command line, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 2,
            ErrorCategory::Input | ErrorCategory::Io => 1,
        }
    }
}

/// Format an error for human-readable stderr output.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, reset) = if use_color {
        ("\x1b[31m", "\x1b[0m")
    } else {
        ("", "")
    };
    format!(
        "{red}error[{code}/{category}]{reset}: {err}",
        red = red,
        reset = reset,
        code = err.code(),
        category = err.category(),
        err = err
    )
}

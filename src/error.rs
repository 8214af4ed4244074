//! Error types for the instagram-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Usage errors
    #[error("Usage error: {0}")]
    Usage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    // Fetch errors
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by Instagram, try again later (HTTP 429)")]
    RateLimited,

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Whether a batch may log this error and continue with the next item.
    pub fn is_item_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_)
                | Error::NotFound(_)
                | Error::RateLimited
                | Error::Http(_)
                | Error::Json(_)
                | Error::InvalidFilename(_)
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => exit_codes::USAGE_ERROR,
            Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                exit_codes::CONFIG_ERROR
            }
            Error::Authentication(_) => exit_codes::AUTH_ERROR,
            Error::Fetch(_) | Error::RateLimited | Error::Http(_) | Error::Json(_) => {
                exit_codes::FETCH_ERROR
            }
            Error::NotFound(_) => exit_codes::NOT_FOUND,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INTERRUPTED: i32 = 1;
    pub const USAGE_ERROR: i32 = 2;
    pub const AUTH_ERROR: i32 = 3;
    pub const FETCH_ERROR: i32 = 4;
    pub const NOT_FOUND: i32 = 5;
    pub const CONFIG_ERROR: i32 = 6;
    pub const UNEXPECTED_ERROR: i32 = 7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::Fetch("timeout".into()).is_item_recoverable());
        assert!(Error::NotFound("post".into()).is_item_recoverable());
        assert!(Error::RateLimited.is_item_recoverable());
        assert!(!Error::Usage("bad".into()).is_item_recoverable());
        assert!(!Error::Authentication("bad".into()).is_item_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Usage("x".into()).exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(
            Error::Authentication("x".into()).exit_code(),
            exit_codes::AUTH_ERROR
        );
        assert_eq!(Error::Fetch("x".into()).exit_code(), exit_codes::FETCH_ERROR);
        assert_eq!(Error::NotFound("x".into()).exit_code(), exit_codes::NOT_FOUND);
        assert_ne!(Error::Usage("x".into()).exit_code(), exit_codes::SUCCESS);
    }
}

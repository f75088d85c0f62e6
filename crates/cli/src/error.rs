//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Profile file not found
    #[error("Profile file not found: {path}")]
    ProfileNotFound { path: String },

    /// Profile parsing error
    #[error("Failed to parse profile: {message}")]
    ProfileParse { message: String },

    /// Profile validation error
    #[error("Profile validation failed: {message}")]
    ProfileValidation { message: String },

    /// Trial snapshot error
    #[error("Failed to load trial snapshot '{path}': {message}")]
    TrialLoad { path: String, message: String },

    /// Detection error
    #[error("Event detection failed: {message}")]
    Detection { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn profile_not_found(path: impl Into<String>) -> Self {
        Self::ProfileNotFound { path: path.into() }
    }

    pub fn profile_parse(message: impl Into<String>) -> Self {
        Self::ProfileParse {
            message: message.into(),
        }
    }

    pub fn trial_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TrialLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn detection(message: impl Into<String>) -> Self {
        Self::Detection {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CliError>;

//! Export-layer error definitions.

use thiserror::Error;

/// Errors from the batch-export pipeline
#[derive(Debug, Error)]
pub enum ExportError {
    /// A recording file could not be read or parsed
    #[error("recording '{path}' unreadable: {message}")]
    Recording { path: String, message: String },

    /// A cycle curve does not match the configured sample count
    #[error("channel '{channel}': cycle has {got} samples, expected {expected}")]
    CycleShape {
        channel: String,
        got: usize,
        expected: usize,
    },

    /// Serialization of the aggregate output failed
    #[error("aggregate serialize error ({format}): {message}")]
    Serialize { format: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn recording(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Recording {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn serialize(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialize {
            format: format.into(),
            message: message.into(),
        }
    }
}

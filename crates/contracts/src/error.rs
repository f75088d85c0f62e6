//! Layered error definitions
//!
//! Categorized by source: config / session / signal / export

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum GaitError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Session Errors =====
    /// A required precondition of the capture session does not hold
    /// (no subject loaded, no trial, degenerate region of interest)
    #[error("session precondition failed: {message}")]
    Precondition { message: String },

    /// A required marker trajectory is absent from the session
    #[error("marker '{marker}' not found for subject '{subject}'")]
    MissingMarker { subject: String, marker: String },

    /// Force-plate data is absent from the session
    #[error("force-plate channel missing: {message}")]
    MissingForcePlate { message: String },

    // ===== Signal / Calibration Errors =====
    /// A trajectory is too short to analyze
    #[error("trajectory '{marker}' too short: {len} frames, need at least {min}")]
    TrajectoryTooShort {
        marker: String,
        len: usize,
        min: usize,
    },

    /// No force-plate contact detectable in the region of interest
    #[error("no force-plate contact found in region of interest")]
    NoForceContact,

    /// A force-plate frame falls outside the analysis window
    #[error("force-plate frame {frame} outside analysis window of {len} frames")]
    FrameOutOfWindow { frame: usize, len: usize },

    // ===== Export Errors =====
    /// Export write error
    #[error("export '{target}' write error: {message}")]
    ExportWrite { target: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl GaitError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create session precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create missing-marker error
    pub fn missing_marker(subject: impl Into<String>, marker: impl Into<String>) -> Self {
        Self::MissingMarker {
            subject: subject.into(),
            marker: marker.into(),
        }
    }

    /// Create export write error
    pub fn export_write(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportWrite {
            target: target.into(),
            message: message.into(),
        }
    }
}

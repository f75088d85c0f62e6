//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON profile files
//! - Validate profile legality
//! - Produce `AnalysisProfile`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let profile = ConfigLoader::load_from_path(Path::new("profile.toml")).unwrap();
//! println!("fall threshold: {}", profile.detector.threshold_fall);
//! ```

mod parser;
mod validator;

pub use contracts::AnalysisProfile;
pub use parser::ConfigFormat;

use contracts::GaitError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load a profile from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a profile from a file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<AnalysisProfile, GaitError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a profile from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisProfile, GaitError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize a profile to a TOML string
    pub fn to_toml(profile: &AnalysisProfile) -> Result<String, GaitError> {
        toml::to_string_pretty(profile)
            .map_err(|e| GaitError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a profile to a JSON string
    pub fn to_json(profile: &AnalysisProfile) -> Result<String, GaitError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| GaitError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, GaitError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            GaitError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| GaitError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, GaitError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate profile content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisProfile, GaitError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }
}

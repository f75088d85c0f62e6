//! Profile parsing
//!
//! TOML is the primary format, JSON the secondary.

use contracts::{AnalysisProfile, GaitError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (preferred)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML profile
pub fn parse_toml(content: &str) -> Result<AnalysisProfile, GaitError> {
    toml::from_str(content).map_err(|e| GaitError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON profile
pub fn parse_json(content: &str) -> Result<AnalysisProfile, GaitError> {
    serde_json::from_str(content).map_err(|e| GaitError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AnalysisProfile, GaitError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[detector]
threshold_fall = 0.25
threshold_rise = 0.55

[markers.left]
heel = "LHEE"
toe = "LTOE"
ankle = "LANK"

[markers.right]
heel = "RHEE"
toe = "RTOE"
ankle = "RANK"

[export]
model_channels = ["RKneeAnglesX"]
allowed_tags = ["T1"]
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.detector.threshold_fall, 0.25);
        assert_eq!(profile.markers.left.heel, "LHEE");
        assert_eq!(profile.export.model_channels, vec!["RKneeAnglesX"]);
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let profile = parse_toml("").unwrap();
        assert_eq!(profile.detector.threshold_fall, 0.2);
        assert_eq!(profile.detector.threshold_rise, 0.5);
        assert_eq!(profile.export.model_cycle_len, 101);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "detector": { "threshold_fall": 0.3 },
            "export": {
                "emg_channels": ["RGas", "LGas"],
                "allowed_tags": ["E1"]
            }
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        assert_eq!(result.unwrap().export.emg_channels.len(), 2);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, GaitError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_toml_unknown_key() {
        let result = parse_toml("[detector]\ntreshold_fall = 0.2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}

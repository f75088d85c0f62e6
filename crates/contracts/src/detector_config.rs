//! Detector configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

use crate::MarkerId;

/// Gait event detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorConfig {
    /// Fall threshold as a fraction of max foot-center speed
    /// (foot strike: speed drops below it)
    #[serde(default = "default_threshold_fall")]
    pub threshold_fall: f64,

    /// Rise threshold as a fraction of max foot-center speed
    /// (foot off: speed climbs above it)
    #[serde(default = "default_threshold_rise")]
    pub threshold_rise: f64,

    /// Force-plate contact threshold as a fraction of max force
    #[serde(default = "default_force_contact_fraction")]
    pub force_contact_fraction: f64,

    /// Median-filter kernel length for the speed signal (odd)
    #[serde(default = "default_speed_median_len")]
    pub speed_median_len: usize,

    /// Median-filter kernel length for the force signal (odd)
    #[serde(default = "default_force_median_len")]
    pub force_median_len: usize,

    /// Maximum acceptable distance (frames) between a default strike
    /// candidate and the force-plate strike for that candidate's side to
    /// be trusted as the calibration source. Beyond it the detector
    /// warns and keeps the default thresholds.
    #[serde(default = "default_max_calibration_offset")]
    pub max_calibration_offset: usize,
}

fn default_threshold_fall() -> f64 {
    0.2
}

fn default_threshold_rise() -> f64 {
    0.5
}

fn default_force_contact_fraction() -> f64 {
    0.02
}

fn default_speed_median_len() -> usize {
    3
}

fn default_force_median_len() -> usize {
    5
}

fn default_max_calibration_offset() -> usize {
    10
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_fall: default_threshold_fall(),
            threshold_rise: default_threshold_rise(),
            force_contact_fraction: default_force_contact_fraction(),
            speed_median_len: default_speed_median_len(),
            force_median_len: default_force_median_len(),
            max_calibration_offset: default_max_calibration_offset(),
        }
    }
}

/// The three foot markers used to form the foot-center signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootMarkers {
    pub heel: MarkerId,
    pub toe: MarkerId,
    pub ankle: MarkerId,
}

impl FootMarkers {
    /// The markers in heel, toe, ankle order
    pub fn all(&self) -> [&MarkerId; 3] {
        [&self.heel, &self.toe, &self.ankle]
    }
}

/// Marker names per side.
///
/// Defaults follow the Plug-in-Gait labeling scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSet {
    #[serde(default = "default_left_markers")]
    pub left: FootMarkers,
    #[serde(default = "default_right_markers")]
    pub right: FootMarkers,
}

fn default_left_markers() -> FootMarkers {
    FootMarkers {
        heel: "LHEE".into(),
        toe: "LTOE".into(),
        ankle: "LANK".into(),
    }
}

fn default_right_markers() -> FootMarkers {
    FootMarkers {
        heel: "RHEE".into(),
        toe: "RTOE".into(),
        ankle: "RANK".into(),
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            left: default_left_markers(),
            right: default_right_markers(),
        }
    }
}

impl MarkerSet {
    /// All six marker names, left foot first
    pub fn all(&self) -> [&MarkerId; 6] {
        let [lh, lt, la] = self.left.all();
        let [rh, rt, ra] = self.right.all();
        [lh, lt, la, rh, rt, ra]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = DetectorConfig::default();
        assert_eq!(config.threshold_fall, 0.2);
        assert_eq!(config.threshold_rise, 0.5);
        assert_eq!(config.force_contact_fraction, 0.02);
        assert_eq!(config.speed_median_len, 3);
        assert_eq!(config.force_median_len, 5);
    }

    #[test]
    fn test_default_marker_names() {
        let markers = MarkerSet::default();
        assert_eq!(markers.left.heel, "LHEE");
        assert_eq!(markers.right.ankle, "RANK");
        assert_eq!(markers.all().len(), 6);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: DetectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.threshold_fall, 0.2);
        assert_eq!(config.max_calibration_offset, 10);
    }
}

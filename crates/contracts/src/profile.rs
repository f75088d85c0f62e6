//! AnalysisProfile - Config Loader output
//!
//! The complete typed configuration of one analysis setup: detector
//! thresholds, marker naming, and batch-export channel selection.
//! Unknown keys are rejected at parse time so a typo never silently
//! becomes a default.

use serde::{Deserialize, Serialize};

use crate::{DetectorConfig, MarkerSet};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileVersion {
    #[default]
    V1,
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisProfile {
    /// Configuration version
    #[serde(default)]
    pub version: ProfileVersion,

    /// Event detector settings
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Marker naming
    #[serde(default)]
    pub markers: MarkerSet,

    /// Batch export settings
    #[serde(default)]
    pub export: ExportProfile,
}

/// Batch-export channel selection and shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportProfile {
    /// Kinematic/kinetic model channels to aggregate
    #[serde(default)]
    pub model_channels: Vec<String>,

    /// EMG channels to aggregate
    #[serde(default)]
    pub emg_channels: Vec<String>,

    /// Model channels whose time derivative is also emitted
    /// (as `<channel>_dt`); must be a subset of `model_channels`
    #[serde(default)]
    pub derive_channels: Vec<String>,

    /// Trial tags accepted into the aggregation
    #[serde(default)]
    pub allowed_tags: Vec<String>,

    /// Samples per normalized gait cycle for model channels
    #[serde(default = "default_model_cycle_len")]
    pub model_cycle_len: usize,

    /// Samples per cycle for EMG channels
    #[serde(default = "default_emg_cycle_len")]
    pub emg_cycle_len: usize,
}

fn default_model_cycle_len() -> usize {
    101
}

fn default_emg_cycle_len() -> usize {
    1000
}

impl Default for ExportProfile {
    fn default() -> Self {
        Self {
            model_channels: Vec::new(),
            emg_channels: Vec::new(),
            derive_channels: Vec::new(),
            allowed_tags: Vec::new(),
            model_cycle_len: default_model_cycle_len(),
            emg_cycle_len: default_emg_cycle_len(),
        }
    }
}

//! TrialRecording - archived trial on disk
//!
//! One JSON file per archived trial: a categorical tag, the frame
//! rate, and per-channel cycle data already normalized to fixed sample
//! counts by the processing that produced the archive.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use contracts::FrameSpan;

use crate::error::ExportError;

/// Normalized cycle curves of one channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelCycles {
    /// One curve per gait cycle, each with the group's fixed sample count
    pub curves: Vec<Vec<f64>>,

    /// Source frame span of each cycle, aligned with `curves`
    #[serde(default)]
    pub spans: Vec<FrameSpan>,
}

impl ChannelCycles {
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// One archived trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecording {
    /// Trial name
    pub trial: String,

    /// Categorical label assigned in the session database
    pub tag: String,

    /// Video frame rate (Hz), needed to restore cycle durations
    pub frame_rate: f64,

    /// Kinematic/kinetic channels
    #[serde(default)]
    pub model: BTreeMap<String, ChannelCycles>,

    /// EMG envelope channels
    #[serde(default)]
    pub emg: BTreeMap<String, ChannelCycles>,
}

impl TrialRecording {
    /// Read a recording file
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let file = File::open(path)
            .map_err(|e| ExportError::recording(path.display().to_string(), e.to_string()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ExportError::recording(path.display().to_string(), e.to_string()))
    }
}

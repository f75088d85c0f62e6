//! ForceSignal - total vertical ground-reaction force
//!
//! Sampled at the analog rate, which is typically a whole multiple of
//! the video frame rate.

use serde::{Deserialize, Serialize};

use crate::GaitError;

/// Total vertical force over the region of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceSignal {
    /// Force samples (N), analog rate
    pub total: Vec<f64>,

    /// Analog samples per video frame
    pub samples_per_frame: f64,
}

impl ForceSignal {
    /// Build a force signal, rejecting degenerate inputs.
    pub fn new(total: Vec<f64>, samples_per_frame: f64) -> Result<Self, GaitError> {
        if total.is_empty() {
            return Err(GaitError::MissingForcePlate {
                message: "empty force channel".into(),
            });
        }
        if samples_per_frame <= 0.0 || !samples_per_frame.is_finite() {
            return Err(GaitError::MissingForcePlate {
                message: format!("invalid samples_per_frame: {samples_per_frame}"),
            });
        }
        Ok(Self {
            total,
            samples_per_frame,
        })
    }

    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Convert an analog sample index to the nearest video frame index.
    pub fn sample_to_frame(&self, sample: usize) -> usize {
        (sample as f64 / self.samples_per_frame).round() as usize
    }
}

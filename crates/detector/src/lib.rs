//! # Detector
//!
//! Gait-event autodetection over one trial's marker and force data.
//!
//! Responsibilities:
//! - scalar signal kernel (gradient, median filter, zero crossings)
//! - foot-center speed derivation from heel/toe/ankle markers
//! - force-plate contact localization
//! - adaptive thresholding with per-trial calibration
//!
//! ## Example
//!
//! ```ignore
//! use detector::GaitEventDetector;
//!
//! let detector = GaitEventDetector::new(profile.detector.clone());
//! let detection = detector.detect(&trial)?;
//! for event in detection.events() {
//!     session.create_event(&trial.subject, event)?;
//! }
//! ```

mod detector;
mod forceplate;
pub mod signal;
mod speed;

pub use detector::{Calibration, Detection, EventFrames, GaitEventDetector, SideDetection};
pub use forceplate::{force_contact, ForceContact};
pub use speed::{centroid_velocity, foot_center_speed, marker_velocity};

// Re-export contracts types that appear in this crate's API
pub use contracts::{DetectorConfig, TrialData};

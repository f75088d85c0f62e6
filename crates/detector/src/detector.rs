//! Gait event detector with force-plate threshold calibration.

use metrics::counter;
use serde::Serialize;
use tracing::{info, instrument, warn};

use contracts::{DetectorConfig, EventKind, GaitError, GaitEvent, Side, TrialData};

use crate::forceplate::{force_contact, ForceContact};
use crate::signal::{falling_zerocross, rising_zerocross};
use crate::speed::foot_center_speed;

/// Strike and toe-off frames for one side, in absolute recording frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventFrames {
    pub strikes: Vec<usize>,
    pub offs: Vec<usize>,
}

impl EventFrames {
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty() && self.offs.is_empty()
    }

    /// Shift analysis-window frames into absolute recording frames
    fn offset(&self, roi_start: usize) -> EventFrames {
        EventFrames {
            strikes: self.strikes.iter().map(|f| f + roi_start).collect(),
            offs: self.offs.iter().map(|f| f + roi_start).collect(),
        }
    }
}

/// Detection result for one side.
#[derive(Debug, Clone, Serialize)]
pub struct SideDetection {
    pub side: Side,

    /// Median-filtered foot-center speed over the analysis window
    pub speed: Vec<f64>,

    /// Candidates from the fixed default thresholds
    pub initial: EventFrames,

    /// Final events after threshold calibration (identical to
    /// `initial` when calibration was not applied)
    pub calibrated: EventFrames,
}

/// How the per-trial thresholds were derived.
#[derive(Debug, Clone, Serialize)]
pub struct Calibration {
    /// Whether force-plate calibration replaced the default thresholds
    pub applied: bool,

    /// Side whose speed signal supplied the calibrated thresholds
    pub source_side: Option<Side>,

    /// Fall threshold actually used (fraction of per-side max speed)
    pub threshold_fall: f64,

    /// Rise threshold actually used (fraction of per-side max speed)
    pub threshold_rise: f64,

    /// Force-plate strike frame (window-relative)
    pub fp_strike: usize,

    /// Force-plate toe-off frame (window-relative)
    pub fp_toeoff: usize,

    /// Distance in frames between the chosen candidate and the
    /// force-plate strike
    pub candidate_offset: Option<usize>,
}

/// Full detection output for one trial.
///
/// The per-side speed signals plus the initial and calibrated frame
/// lists form the payload handed to the comparison-figure renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub subject: String,
    pub trial: String,
    pub roi_start: usize,
    pub left: SideDetection,
    pub right: SideDetection,
    pub calibration: Calibration,
}

impl Detection {
    /// The calibrated events as provenance-tagged store records.
    pub fn events(&self) -> Vec<GaitEvent> {
        let mut events = Vec::new();
        for side in [&self.left, &self.right] {
            for &frame in &side.calibrated.strikes {
                events.push(GaitEvent::auto(side.side, EventKind::FootStrike, frame));
            }
            for &frame in &side.calibrated.offs {
                events.push(GaitEvent::auto(side.side, EventKind::FootOff, frame));
            }
        }
        events
    }
}

/// Gait event detector.
///
/// Stateless apart from its configuration; one call analyzes one trial.
#[derive(Debug, Clone, Default)]
pub struct GaitEventDetector {
    config: DetectorConfig,
}

impl GaitEventDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run autodetection over one trial.
    ///
    /// # Errors
    /// - `NoForceContact` if the plate never registers a contact
    /// - `FrameOutOfWindow` if the plate contact lies outside the
    ///   marker analysis window
    #[instrument(name = "detect_events", skip_all, fields(trial = %trial.trial))]
    pub fn detect(&self, trial: &TrialData) -> Result<Detection, GaitError> {
        let left_speed = foot_center_speed(&trial.left, self.config.speed_median_len);
        let right_speed = foot_center_speed(&trial.right, self.config.speed_median_len);

        // Fixed-threshold candidates, window-relative
        let left_initial = threshold_events(
            &left_speed,
            self.config.threshold_fall,
            self.config.threshold_rise,
        );
        let right_initial = threshold_events(
            &right_speed,
            self.config.threshold_fall,
            self.config.threshold_rise,
        );

        // Force-plate ground truth
        let contact = force_contact(&trial.force, &self.config)?;

        // Pick the calibration source: the side whose default strike
        // candidate lands nearest the plate contact
        let left_offset = nearest_offset(&left_initial.strikes, contact.strike);
        let right_offset = nearest_offset(&right_initial.strikes, contact.strike);
        let source = match (left_offset, right_offset) {
            (Some(l), Some(r)) if l < r => Some((Side::Left, l)),
            (Some(_), Some(r)) => Some((Side::Right, r)),
            (Some(l), None) => Some((Side::Left, l)),
            (None, Some(r)) => Some((Side::Right, r)),
            (None, None) => None,
        };

        let calibration = self.calibrate(source, &left_speed, &right_speed, contact)?;

        let (left_final, right_final) = if calibration.applied {
            (
                threshold_events(
                    &left_speed,
                    calibration.threshold_fall,
                    calibration.threshold_rise,
                ),
                threshold_events(
                    &right_speed,
                    calibration.threshold_fall,
                    calibration.threshold_rise,
                ),
            )
        } else {
            (left_initial.clone(), right_initial.clone())
        };

        counter!("gaitmark_detections_total").increment(1);
        info!(
            calibrated = calibration.applied,
            left_strikes = left_final.strikes.len(),
            right_strikes = right_final.strikes.len(),
            "Event detection finished"
        );

        let roi_start = trial.roi.start;
        Ok(Detection {
            subject: trial.subject.clone(),
            trial: trial.trial.clone(),
            roi_start,
            left: SideDetection {
                side: Side::Left,
                speed: left_speed,
                initial: left_initial.offset(roi_start),
                calibrated: left_final.offset(roi_start),
            },
            right: SideDetection {
                side: Side::Right,
                speed: right_speed,
                initial: right_initial.offset(roi_start),
                calibrated: right_final.offset(roi_start),
            },
            calibration,
        })
    }

    /// Re-derive the thresholds from the speed value at the plate
    /// contact, unless the best candidate is too far from it.
    fn calibrate(
        &self,
        source: Option<(Side, usize)>,
        left_speed: &[f64],
        right_speed: &[f64],
        contact: ForceContact,
    ) -> Result<Calibration, GaitError> {
        let defaults = Calibration {
            applied: false,
            source_side: None,
            threshold_fall: self.config.threshold_fall,
            threshold_rise: self.config.threshold_rise,
            fp_strike: contact.strike,
            fp_toeoff: contact.toeoff,
            candidate_offset: None,
        };

        let Some((side, offset)) = source else {
            counter!("gaitmark_calibrations_skipped_total").increment(1);
            warn!("no default strike candidates on either side, keeping default thresholds");
            return Ok(defaults);
        };

        if offset > self.config.max_calibration_offset {
            counter!("gaitmark_calibrations_skipped_total").increment(1);
            warn!(
                side = %side,
                offset,
                max = self.config.max_calibration_offset,
                "closest strike candidate too far from force-plate contact, \
                 keeping default thresholds"
            );
            return Ok(Calibration {
                candidate_offset: Some(offset),
                ..defaults
            });
        }

        let speed = match side {
            Side::Left => left_speed,
            Side::Right => right_speed,
        };
        for frame in [contact.strike, contact.toeoff] {
            if frame >= speed.len() {
                return Err(GaitError::FrameOutOfWindow {
                    frame,
                    len: speed.len(),
                });
            }
        }

        let max = speed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(max > 0.0) {
            counter!("gaitmark_calibrations_skipped_total").increment(1);
            warn!(side = %side, "flat speed signal on calibration side, keeping defaults");
            return Ok(defaults);
        }

        let threshold_fall = speed[contact.strike] / max;
        let threshold_rise = speed[contact.toeoff] / max;

        counter!("gaitmark_calibrations_applied_total").increment(1);
        info!(
            side = %side,
            threshold_fall = format!("{threshold_fall:.3}"),
            threshold_rise = format!("{threshold_rise:.3}"),
            "Thresholds re-derived from force plate"
        );

        Ok(Calibration {
            applied: true,
            source_side: Some(side),
            threshold_fall,
            threshold_rise,
            fp_strike: contact.strike,
            fp_toeoff: contact.toeoff,
            candidate_offset: Some(offset),
        })
    }
}

/// Strike/toe-off candidates of one speed signal for a threshold pair
/// given as fractions of the signal's own maximum. Frames are relative
/// to the analysis window.
fn threshold_events(speed: &[f64], fall_fraction: f64, rise_fraction: f64) -> EventFrames {
    let max = speed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max > 0.0) {
        return EventFrames::default();
    }

    let shifted_fall: Vec<f64> = speed.iter().map(|v| v - fall_fraction * max).collect();
    let shifted_rise: Vec<f64> = speed.iter().map(|v| v - rise_fraction * max).collect();

    EventFrames {
        strikes: falling_zerocross(&shifted_fall),
        offs: rising_zerocross(&shifted_rise),
    }
}

/// Smallest |candidate − target| over the candidate list.
fn nearest_offset(candidates: &[usize], target: usize) -> Option<usize> {
    candidates
        .iter()
        .map(|&c| c.abs_diff(target))
        .min()
}

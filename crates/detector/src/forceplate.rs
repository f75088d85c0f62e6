//! Force-plate ground truth: contact onset and offset frames.

use tracing::debug;

use contracts::{DetectorConfig, ForceSignal, GaitError};

use crate::signal::{falling_zerocross, median_filter, rising_zerocross};

/// Force-plate contact expressed in video frames relative to the
/// analysis window (analog sample 0 is aligned with the window start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceContact {
    /// Frame of the first large force increase (foot strike)
    pub strike: usize,
    /// Frame of the last force decrease (toe-off)
    pub toeoff: usize,
}

/// Derive strike and toe-off frames from the total vertical force.
///
/// The force channel is median-filtered against spikes, normalized by
/// its maximum, and thresholded at `force_contact_fraction`: the first
/// rising crossing is contact onset, the last falling crossing contact
/// offset. Analog sample indices convert to frames by the
/// samples-per-frame ratio, rounded to nearest.
///
/// # Errors
/// `GaitError::NoForceContact` when the channel never crosses the
/// threshold (no clean plate contact in the region of interest); the
/// calibration step treats this as a fatal precondition.
pub fn force_contact(
    force: &ForceSignal,
    config: &DetectorConfig,
) -> Result<ForceContact, GaitError> {
    let filtered = median_filter(&force.total, config.force_median_len);

    let max = filtered.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max > 0.0) {
        return Err(GaitError::NoForceContact);
    }

    let shifted: Vec<f64> = filtered
        .iter()
        .map(|f| f / max - config.force_contact_fraction)
        .collect();

    let strike_sample = *rising_zerocross(&shifted)
        .first()
        .ok_or(GaitError::NoForceContact)?;
    let toeoff_sample = *falling_zerocross(&shifted)
        .last()
        .ok_or(GaitError::NoForceContact)?;

    let contact = ForceContact {
        strike: force.sample_to_frame(strike_sample),
        toeoff: force.sample_to_frame(toeoff_sample),
    };
    debug!(
        strike_sample,
        toeoff_sample,
        strike_frame = contact.strike,
        toeoff_frame = contact.toeoff,
        "Force-plate contact located"
    );
    Ok(contact)
}

//! Profile validation
//!
//! Rules:
//! - thresholds in (0, 1), fall < rise
//! - force contact fraction in (0, 0.5)
//! - median kernel lengths odd, >= 3
//! - marker names non-empty and unique across the set
//! - derive_channels a subset of model_channels
//! - cycle lengths >= 2

use std::collections::HashSet;

use contracts::{AnalysisProfile, GaitError};

/// Validate an AnalysisProfile
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(profile: &AnalysisProfile) -> Result<(), GaitError> {
    validate_thresholds(profile)?;
    validate_filters(profile)?;
    validate_markers(profile)?;
    validate_export(profile)?;
    Ok(())
}

fn validate_thresholds(profile: &AnalysisProfile) -> Result<(), GaitError> {
    let d = &profile.detector;

    for (field, value) in [
        ("detector.threshold_fall", d.threshold_fall),
        ("detector.threshold_rise", d.threshold_rise),
    ] {
        if !(value > 0.0 && value < 1.0) {
            return Err(GaitError::config_validation(
                field,
                format!("must be in (0, 1), got {value}"),
            ));
        }
    }

    if d.threshold_fall >= d.threshold_rise {
        return Err(GaitError::config_validation(
            "detector.threshold_fall / detector.threshold_rise",
            format!(
                "threshold_fall ({}) must be < threshold_rise ({})",
                d.threshold_fall, d.threshold_rise
            ),
        ));
    }

    if !(d.force_contact_fraction > 0.0 && d.force_contact_fraction < 0.5) {
        return Err(GaitError::config_validation(
            "detector.force_contact_fraction",
            format!("must be in (0, 0.5), got {}", d.force_contact_fraction),
        ));
    }

    Ok(())
}

fn validate_filters(profile: &AnalysisProfile) -> Result<(), GaitError> {
    for (field, len) in [
        ("detector.speed_median_len", profile.detector.speed_median_len),
        ("detector.force_median_len", profile.detector.force_median_len),
    ] {
        if len < 3 || len % 2 == 0 {
            return Err(GaitError::config_validation(
                field,
                format!("median kernel length must be odd and >= 3, got {len}"),
            ));
        }
    }
    Ok(())
}

fn validate_markers(profile: &AnalysisProfile) -> Result<(), GaitError> {
    let mut seen = HashSet::new();
    for marker in profile.markers.all() {
        if marker.is_empty() {
            return Err(GaitError::config_validation(
                "markers",
                "marker name cannot be empty",
            ));
        }
        if !seen.insert(marker.as_str()) {
            return Err(GaitError::config_validation(
                format!("markers[{marker}]"),
                "duplicate marker name",
            ));
        }
    }
    Ok(())
}

fn validate_export(profile: &AnalysisProfile) -> Result<(), GaitError> {
    let e = &profile.export;

    let model: HashSet<_> = e.model_channels.iter().collect();
    for channel in &e.derive_channels {
        if !model.contains(channel) {
            return Err(GaitError::config_validation(
                format!("export.derive_channels[{channel}]"),
                "derivative channel not present in model_channels",
            ));
        }
    }

    for (field, len) in [
        ("export.model_cycle_len", e.model_cycle_len),
        ("export.emg_cycle_len", e.emg_cycle_len),
    ] {
        if len < 2 {
            return Err(GaitError::config_validation(
                field,
                format!("cycle length must be >= 2, got {len}"),
            ));
        }
    }

    let wants_export = !e.model_channels.is_empty() || !e.emg_channels.is_empty();
    if wants_export && e.allowed_tags.is_empty() {
        return Err(GaitError::config_validation(
            "export.allowed_tags",
            "channel lists configured but no trial tags allowed",
        ));
    }

    Ok(())
}

//! `mark` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use capture::{load_trial, SnapshotSession};
use contracts::{AnalysisProfile, CaptureSession};
use detector::{Detection, GaitEventDetector};
use observability::metrics::{record_detection, record_events_written, DetectionSample};

use crate::cli::MarkArgs;
use crate::report;

/// Execute the `mark` command
pub fn run_mark(args: &MarkArgs) -> Result<()> {
    let profile = load_profile(args)?;

    // Metrics endpoint (optional)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    // Load the trial
    info!(trial = %args.trial.display(), "Loading trial snapshot");
    let mut session = SnapshotSession::load(&args.trial)
        .with_context(|| format!("Failed to load trial snapshot {}", args.trial.display()))?;
    let trial = load_trial(&session, &profile.markers).context("Failed to read trial data")?;

    // Detect events
    let detector = GaitEventDetector::new(profile.detector.clone());
    let detection = detector
        .detect(&trial)
        .context("Event detection failed")?;

    record_detection(&sample_from(&detection));
    report::print_comparison(&detection);

    if let Some(ref report_path) = args.report {
        report::write_report(report_path, &detection)?;
        info!(path = %report_path.display(), "Detection report written");
    }

    // Write events back to the store
    if args.dry_run {
        info!("Dry run - event store untouched");
        return Ok(());
    }

    if args.keep_events {
        warn!("Keeping previous automatic events; duplicates are possible");
    } else {
        let removed = session
            .clear_auto_events(&trial.subject)
            .context("Failed to clear previous automatic events")?;
        if removed > 0 {
            info!(removed, "Previous automatic events cleared");
        }
    }

    let events = detection.events();
    for event in &events {
        session
            .create_event(&trial.subject, *event)
            .with_context(|| format!("Failed to create event: {event}"))?;
    }
    record_events_written(&events);

    let output = args.output.as_ref().unwrap_or(&args.trial);
    session
        .save(output)
        .with_context(|| format!("Failed to save snapshot to {}", output.display()))?;

    info!(
        events = events.len(),
        output = %output.display(),
        "Events marked and snapshot saved"
    );
    Ok(())
}

/// Load the analysis profile, falling back to defaults when omitted.
fn load_profile(args: &MarkArgs) -> Result<AnalysisProfile> {
    match &args.profile {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Profile file not found: {}", path.display());
            }
            info!(profile = %path.display(), "Loading analysis profile");
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load profile from {}", path.display()))
        }
        None => {
            info!("No profile given, using default thresholds and marker names");
            Ok(AnalysisProfile::default())
        }
    }
}

/// Flatten a detection for the metrics layer.
fn sample_from(detection: &Detection) -> DetectionSample {
    let max = |speed: &[f64]| speed.iter().copied().fold(0.0_f64, f64::max);
    DetectionSample {
        calibration_applied: detection.calibration.applied,
        threshold_fall: detection.calibration.threshold_fall,
        threshold_rise: detection.calibration.threshold_rise,
        left_strikes: detection.left.calibrated.strikes.len(),
        left_offs: detection.left.calibrated.offs.len(),
        right_strikes: detection.right.calibrated.strikes.len(),
        right_offs: detection.right.calibrated.offs.len(),
        max_speed_left: max(&detection.left.speed),
        max_speed_right: max(&detection.right.speed),
    }
}

//! Trial loading - one batch read of everything the detector needs
//!
//! Any missing precondition (no subject, degenerate ROI, absent marker,
//! absent force plate) aborts the load; there is no partial recovery.

use metrics::counter;
use tracing::{info, instrument};

use contracts::{
    CaptureSession, FootMarkers, FootTrajectories, FrameSpan, GaitError, MarkerSet, Trajectory,
    TrialData,
};

/// Read the six configured markers and the force plate for the
/// currently loaded trial.
///
/// # Errors
/// - no subject / no trial loaded
/// - degenerate region of interest
/// - a configured marker missing from the session
/// - no force plate, or trajectories too short to analyze
#[instrument(name = "load_trial", skip_all)]
pub fn load_trial(
    session: &dyn CaptureSession,
    markers: &MarkerSet,
) -> Result<TrialData, GaitError> {
    let subjects = session.subject_names()?;
    let subject = subjects
        .first()
        .cloned()
        .ok_or_else(|| GaitError::precondition("no subject loaded in session"))?;

    let trial = session.trial_name()?;
    let roi = session.region_of_interest()?;

    let left = load_foot(session, &subject, roi, &markers.left)?;
    let right = load_foot(session, &subject, roi, &markers.right)?;
    let force = session.force_total()?;

    counter!("gaitmark_trials_loaded_total").increment(1);
    info!(
        subject = %subject,
        trial = %trial.name,
        roi_start = roi.start,
        roi_len = roi.len(),
        force_samples = force.len(),
        "Trial loaded"
    );

    Ok(TrialData {
        subject,
        trial: trial.name,
        roi,
        left,
        right,
        force,
    })
}

fn load_foot(
    session: &dyn CaptureSession,
    subject: &str,
    roi: FrameSpan,
    markers: &FootMarkers,
) -> Result<FootTrajectories, GaitError> {
    let heel = load_marker(session, subject, roi, markers.heel.as_str())?;
    let toe = load_marker(session, subject, roi, markers.toe.as_str())?;
    let ankle = load_marker(session, subject, roi, markers.ankle.as_str())?;
    Ok(FootTrajectories { heel, toe, ankle })
}

fn load_marker(
    session: &dyn CaptureSession,
    subject: &str,
    roi: FrameSpan,
    marker: &str,
) -> Result<Trajectory, GaitError> {
    let full = session.trajectory(subject, marker)?;
    let sliced = full.slice(roi)?;
    sliced.ensure_analyzable()?;
    Ok(sliced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SnapshotSession, TrialSnapshot};
    use contracts::{ForceSignal, Point3};

    fn walking_snapshot() -> TrialSnapshot {
        let span = FrameSpan::new(0, 100);
        let markers = ["LHEE", "LTOE", "LANK", "RHEE", "RTOE", "RANK"];
        let mut snapshot = TrialSnapshot::new("patient01", "walk01", FrameSpan::new(10, 90));
        for marker in markers {
            let points: Vec<Point3> = (0..100)
                .map(|i| Point3::new(i as f64 * 5.0, 0.0, 80.0))
                .collect();
            snapshot = snapshot.with_trajectory(Trajectory::new(marker, span, points).unwrap());
        }
        snapshot.with_force(ForceSignal::new(vec![0.0; 800], 10.0).unwrap())
    }

    #[test]
    fn test_load_trial_slices_to_roi() {
        let session = SnapshotSession::from_snapshot(walking_snapshot());
        let trial = load_trial(&session, &MarkerSet::default()).unwrap();

        assert_eq!(trial.subject, "patient01");
        assert_eq!(trial.roi, FrameSpan::new(10, 90));
        assert_eq!(trial.left.heel.len(), 80);
        assert_eq!(trial.right.ankle.span.start, 10);
        // first ROI sample is frame 10 of the recording
        assert_eq!(trial.left.heel.points[0].x, 50.0);
    }

    #[test]
    fn test_load_trial_no_subject() {
        let mut snapshot = walking_snapshot();
        snapshot.subjects.clear();
        let session = SnapshotSession::from_snapshot(snapshot);
        let err = load_trial(&session, &MarkerSet::default()).unwrap_err();
        assert!(err.to_string().contains("no subject"));
    }

    #[test]
    fn test_load_trial_missing_marker() {
        let mut snapshot = walking_snapshot();
        snapshot.trajectories.remove("RTOE");
        let session = SnapshotSession::from_snapshot(snapshot);
        let err = load_trial(&session, &MarkerSet::default()).unwrap_err();
        assert!(matches!(err, GaitError::MissingMarker { .. }));
    }

    #[test]
    fn test_load_trial_missing_force() {
        let mut snapshot = walking_snapshot();
        snapshot.force = None;
        let session = SnapshotSession::from_snapshot(snapshot);
        let err = load_trial(&session, &MarkerSet::default()).unwrap_err();
        assert!(matches!(err, GaitError::MissingForcePlate { .. }));
    }

    #[test]
    fn test_load_trial_short_roi() {
        let mut snapshot = walking_snapshot();
        snapshot.roi = FrameSpan::new(10, 13);
        let session = SnapshotSession::from_snapshot(snapshot);
        let err = load_trial(&session, &MarkerSet::default()).unwrap_err();
        assert!(matches!(err, GaitError::TrajectoryTooShort { .. }));
    }
}

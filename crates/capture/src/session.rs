//! SnapshotSession - CaptureSession over a recorded trial
//!
//! Loads a `TrialSnapshot` from disk, serves reads from memory, and
//! buffers event-store mutations until `save` writes the snapshot back.
//! Also the session fake used throughout the test suites.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::{debug, info, instrument};

use contracts::{
    CaptureSession, EventKind, EventSource, ForceSignal, FrameSpan, GaitError, GaitEvent, Side,
    Trajectory, TrialName,
};

use crate::TrialSnapshot;

/// Capture session backed by an in-memory trial snapshot.
pub struct SnapshotSession {
    snapshot: TrialSnapshot,
    dirty: bool,
}

impl SnapshotSession {
    /// Wrap an already-built snapshot (tests, synthetic trials)
    pub fn from_snapshot(snapshot: TrialSnapshot) -> Self {
        Self {
            snapshot,
            dirty: false,
        }
    }

    /// Load a snapshot file
    #[instrument(name = "snapshot_session_load", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GaitError> {
        let file = File::open(path.as_ref())?;
        let snapshot: TrialSnapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GaitError::precondition(format!("unreadable trial snapshot: {e}")))?;

        info!(
            trial = %snapshot.trial_name,
            subjects = snapshot.subjects.len(),
            markers = snapshot.trajectories.len(),
            "Trial snapshot loaded"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the (possibly mutated) snapshot back to disk
    #[instrument(name = "snapshot_session_save", skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), GaitError> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.snapshot)
            .map_err(|e| GaitError::export_write("trial snapshot", e.to_string()))?;
        self.dirty = false;
        Ok(())
    }

    /// Whether event-store mutations are pending a `save`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All events currently in the store, regardless of side/kind
    pub fn all_events(&self) -> &[GaitEvent] {
        &self.snapshot.events
    }

    fn ensure_subject(&self, subject: &str) -> Result<(), GaitError> {
        if self.snapshot.subjects.iter().any(|s| s == subject) {
            Ok(())
        } else {
            Err(GaitError::precondition(format!(
                "subject '{subject}' not loaded in session"
            )))
        }
    }
}

impl CaptureSession for SnapshotSession {
    fn subject_names(&self) -> Result<Vec<String>, GaitError> {
        Ok(self.snapshot.subjects.clone())
    }

    fn trial_name(&self) -> Result<TrialName, GaitError> {
        if self.snapshot.trial_name.is_empty() {
            return Err(GaitError::precondition("no trial loaded"));
        }
        Ok(TrialName {
            session_path: self.snapshot.session_path.clone(),
            name: self.snapshot.trial_name.clone(),
        })
    }

    fn region_of_interest(&self) -> Result<FrameSpan, GaitError> {
        let roi = self.snapshot.roi;
        if roi.is_empty() {
            return Err(GaitError::precondition(format!(
                "degenerate region of interest [{}, {})",
                roi.start, roi.end
            )));
        }
        Ok(roi)
    }

    fn trajectory(&self, subject: &str, marker: &str) -> Result<Trajectory, GaitError> {
        self.ensure_subject(subject)?;
        self.snapshot
            .trajectories
            .get(marker)
            .cloned()
            .ok_or_else(|| GaitError::missing_marker(subject, marker))
    }

    fn force_total(&self) -> Result<ForceSignal, GaitError> {
        self.snapshot
            .force
            .clone()
            .ok_or_else(|| GaitError::MissingForcePlate {
                message: "no force plate recorded for trial".into(),
            })
    }

    fn events(
        &self,
        subject: &str,
        side: Side,
        kind: EventKind,
    ) -> Result<Vec<GaitEvent>, GaitError> {
        self.ensure_subject(subject)?;
        Ok(self
            .snapshot
            .events
            .iter()
            .filter(|e| e.side == side && e.kind == kind)
            .copied()
            .collect())
    }

    fn clear_auto_events(&mut self, subject: &str) -> Result<usize, GaitError> {
        self.ensure_subject(subject)?;
        let before = self.snapshot.events.len();
        self.snapshot
            .events
            .retain(|e| e.source != EventSource::Auto);
        let removed = before - self.snapshot.events.len();
        if removed > 0 {
            self.dirty = true;
            debug!(removed, "Cleared previous automatic events");
        }
        Ok(removed)
    }

    fn create_event(&mut self, subject: &str, event: GaitEvent) -> Result<(), GaitError> {
        self.ensure_subject(subject)?;
        self.snapshot.events.push(event);
        self.dirty = true;
        Ok(())
    }
}

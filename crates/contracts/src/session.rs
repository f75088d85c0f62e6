//! CaptureSession trait - capture-system session boundary
//!
//! The live capture application exposes one session at a time: a loaded
//! subject, a loaded trial, and its event store. Scripts historically
//! reached for that session as ambient global state; here it is an
//! explicit handle injected into whatever consumes it, so the detector
//! runs unchanged against a fake session in tests.

use crate::{EventKind, ForceSignal, FrameSpan, GaitError, GaitEvent, Side, Trajectory};

/// Name of the currently loaded trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialName {
    /// Directory of the session on disk
    pub session_path: String,
    /// Trial name within the session
    pub name: String,
}

/// Narrow read/write view of a capture-system session.
///
/// One trial is loaded, analyzed and written back synchronously; the
/// session is held exclusively for the duration of a run. Every
/// operation can fail if the corresponding entity is not loaded, and
/// such failures abort the run.
pub trait CaptureSession {
    /// Names of subjects present in the session (first is the active one)
    fn subject_names(&self) -> Result<Vec<String>, GaitError>;

    /// Name of the currently loaded trial
    fn trial_name(&self) -> Result<TrialName, GaitError>;

    /// Region of interest selected for the trial
    fn region_of_interest(&self) -> Result<FrameSpan, GaitError>;

    /// A marker's trajectory over the whole recording
    fn trajectory(&self, subject: &str, marker: &str) -> Result<Trajectory, GaitError>;

    /// Total vertical force over the region of interest, plus the
    /// analog-samples-per-frame ratio
    fn force_total(&self) -> Result<ForceSignal, GaitError>;

    /// Events of one (side, kind) for a subject
    fn events(&self, subject: &str, side: Side, kind: EventKind)
        -> Result<Vec<GaitEvent>, GaitError>;

    /// Remove all automatically generated events for a subject,
    /// leaving manual events in place. Returns the number removed.
    fn clear_auto_events(&mut self, subject: &str) -> Result<usize, GaitError>;

    /// Append an event to the store
    fn create_event(&mut self, subject: &str, event: GaitEvent) -> Result<(), GaitError>;
}

//! # Capture
//!
//! Capture-system session boundary.
//!
//! Responsibilities:
//! - `SnapshotSession`: a `CaptureSession` backed by a recorded trial
//!   snapshot on disk, usable without the vendor capture application
//! - `load_trial`: pull the configured markers and force plate for the
//!   currently loaded trial, enforcing session preconditions
//!
//! The live vendor SDK would be a second `CaptureSession` implementation
//! behind the same trait; nothing downstream can tell them apart.

mod session;
mod snapshot;
mod trial;

pub use session::SnapshotSession;
pub use snapshot::TrialSnapshot;
pub use trial::load_trial;

// Re-export contracts types that flow through this boundary
pub use contracts::{FootTrajectories, TrialData};

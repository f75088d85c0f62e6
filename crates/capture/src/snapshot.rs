//! TrialSnapshot - recorded trial state on disk
//!
//! A JSON snapshot of everything the detector needs from one trial:
//! subject, region of interest, marker trajectories over the whole
//! recording, the total force channel, and the event store contents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use contracts::{ForceSignal, FrameSpan, GaitEvent, Trajectory};

/// Serialized capture-session state for one trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSnapshot {
    /// Subject names, active subject first
    pub subjects: Vec<String>,

    /// Session directory the trial came from
    pub session_path: String,

    /// Trial name
    pub trial_name: String,

    /// Region of interest selected in the capture application
    pub roi: FrameSpan,

    /// Marker name -> whole-recording trajectory
    pub trajectories: HashMap<String, Trajectory>,

    /// Total vertical force, if a plate was active
    pub force: Option<ForceSignal>,

    /// Event store contents
    #[serde(default)]
    pub events: Vec<GaitEvent>,
}

impl TrialSnapshot {
    /// Minimal snapshot skeleton for one subject; trajectories, force
    /// and events are filled in afterwards.
    pub fn new(subject: impl Into<String>, trial_name: impl Into<String>, roi: FrameSpan) -> Self {
        Self {
            subjects: vec![subject.into()],
            session_path: String::new(),
            trial_name: trial_name.into(),
            roi,
            trajectories: HashMap::new(),
            force: None,
            events: Vec::new(),
        }
    }

    /// Register a trajectory under its marker name
    pub fn with_trajectory(mut self, trajectory: Trajectory) -> Self {
        self.trajectories
            .insert(trajectory.marker.to_string(), trajectory);
        self
    }

    /// Attach the force channel
    pub fn with_force(mut self, force: ForceSignal) -> Self {
        self.force = Some(force);
        self
    }

    /// Seed the event store
    pub fn with_events(mut self, events: Vec<GaitEvent>) -> Self {
        self.events = events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Point3;

    #[test]
    fn test_snapshot_round_trip() {
        let span = FrameSpan::new(0, 6);
        let points: Vec<Point3> = (0..6).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let snapshot = TrialSnapshot::new("patient01", "walk03", FrameSpan::new(1, 5))
            .with_trajectory(Trajectory::new("RHEE", span, points).unwrap())
            .with_force(ForceSignal::new(vec![0.0, 10.0, 0.0], 2.0).unwrap());

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: TrialSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.trial_name, "walk03");
        assert_eq!(parsed.roi, FrameSpan::new(1, 5));
        assert!(parsed.trajectories.contains_key("RHEE"));
        assert_eq!(parsed.force.unwrap().samples_per_frame, 2.0);
        assert!(parsed.events.is_empty());
    }
}

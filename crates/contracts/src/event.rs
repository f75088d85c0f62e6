//! GaitEvent - event-store records
//!
//! Side and kind use the capture system's fixed vocabularies
//! ("Left"/"Right", "Foot Strike"/"Foot Off").

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body side of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The vocabulary string used by the capture system's event store
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }

    /// The opposite side
    pub fn other(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Both sides, left first
    pub fn both() -> [Side; 2] {
        [Side::Left, Side::Right]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gait event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Foot makes ground contact
    FootStrike,
    /// Foot leaves the ground (toe-off)
    FootOff,
}

impl EventKind {
    /// The vocabulary string used by the capture system's event store
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FootStrike => "Foot Strike",
            EventKind::FootOff => "Foot Off",
        }
    }

    pub fn both() -> [EventKind; 2] {
        [EventKind::FootStrike, EventKind::FootOff]
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an event in the store.
///
/// Automatic re-marking only ever clears `Auto` events; events placed by
/// a clinician stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Marked by an operator
    #[default]
    Manual,
    /// Marked by the autodetection procedure
    Auto,
}

/// A (side, kind, frame) event with provenance.
///
/// `frame` is always an absolute recording frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaitEvent {
    pub side: Side,
    pub kind: EventKind,
    pub frame: usize,
    #[serde(default)]
    pub source: EventSource,
}

impl GaitEvent {
    pub fn auto(side: Side, kind: EventKind, frame: usize) -> Self {
        Self {
            side,
            kind,
            frame,
            source: EventSource::Auto,
        }
    }

    pub fn manual(side: Side, kind: EventKind, frame: usize) -> Self {
        Self {
            side,
            kind,
            frame,
            source: EventSource::Manual,
        }
    }
}

impl fmt::Display for GaitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.side, self.kind, self.frame)
    }
}

//! # Export
//!
//! Offline batch aggregation of archived trial recordings.
//!
//! Responsibilities:
//! - read `TrialRecording` files, filter by allow-listed trial tag
//! - aggregate named channels into fixed-height cycle matrices
//!   (101 samples for model data, 1000 for EMG)
//! - compute time-derivative channels for a configured subset
//! - serialize the aggregates (JSON / bincode) for the downstream
//!   statistics package
//!
//! Shares no state with the event detector; both sides consume the
//! same capture-format ecosystem.

mod aggregate;
mod batch;
mod error;
mod recording;
mod writer;

pub use aggregate::{Aggregator, ChannelMatrix};
pub use batch::{BatchExporter, ExportStats};
pub use error::ExportError;
pub use recording::{ChannelCycles, TrialRecording};
pub use writer::{write_aggregate, AggregateFile, ExportFormat, ExportMeta};

// Re-export the profile section this crate is driven by
pub use contracts::ExportProfile;

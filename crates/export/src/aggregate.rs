//! Cycle aggregation across recordings.
//!
//! Each requested channel accumulates a fixed-height matrix, one column
//! per gait cycle; a missing or misshapen channel in one file is
//! skipped with a diagnostic and aggregation continues.

use std::collections::{BTreeMap, HashSet};

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::recording::{ChannelCycles, TrialRecording};

/// Fixed-height column matrix: `samples` rows, one column per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMatrix {
    /// Rows (samples per normalized cycle)
    pub samples: usize,

    /// Columns, each one cycle
    pub columns: Vec<Vec<f64>>,
}

impl ChannelMatrix {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            columns: Vec::new(),
        }
    }

    /// Append one cycle, rejecting shape mismatches
    pub fn push_cycle(&mut self, channel: &str, curve: Vec<f64>) -> Result<(), ExportError> {
        if curve.len() != self.samples {
            return Err(ExportError::CycleShape {
                channel: channel.to_string(),
                got: curve.len(),
                expected: self.samples,
            });
        }
        self.columns.push(curve);
        Ok(())
    }

    pub fn cycle_count(&self) -> usize {
        self.columns.len()
    }

    /// First difference along the sample axis, scaled per column by the
    /// sample duration in seconds. The result has `samples - 1` rows.
    pub fn derivative(&self, delta_t: &[f64]) -> ChannelMatrix {
        let columns = self
            .columns
            .iter()
            .zip(delta_t)
            .map(|(col, &dt)| {
                col.windows(2)
                    .map(|w| (w[1] - w[0]) / dt)
                    .collect::<Vec<f64>>()
            })
            .collect();
        ChannelMatrix {
            samples: self.samples.saturating_sub(1),
            columns,
        }
    }
}

/// Aggregates one channel group (model or EMG) across files.
#[derive(Debug)]
pub struct Aggregator {
    /// Fixed cycle sample count for this group
    cycle_len: usize,

    /// Requested channel names
    wanted: HashSet<String>,

    /// Accumulated matrices, keyed by channel
    channels: BTreeMap<String, ChannelMatrix>,

    /// Per-cycle sample durations for channels that get derivatives
    delta_t: BTreeMap<String, Vec<f64>>,

    /// Channels to differentiate in `finish`
    derive: HashSet<String>,

    /// (file, channel) pairs skipped with a diagnostic
    pub skipped: Vec<String>,
}

impl Aggregator {
    pub fn new(cycle_len: usize, wanted: &[String], derive: &[String]) -> Self {
        Self {
            cycle_len,
            wanted: wanted.iter().cloned().collect(),
            channels: BTreeMap::new(),
            delta_t: BTreeMap::new(),
            derive: derive.iter().cloned().collect(),
            skipped: Vec::new(),
        }
    }

    /// Fold one recording's channel group into the aggregate.
    ///
    /// Returns the number of cycles added. Missing channels and shape
    /// mismatches are recovered locally: the channel is skipped for
    /// this file and aggregation continues.
    pub fn add_recording(
        &mut self,
        file: &str,
        recording: &TrialRecording,
        group: &BTreeMap<String, ChannelCycles>,
    ) -> usize {
        let mut added = 0;
        for name in self.wanted.clone() {
            let Some(cycles) = group.get(&name) else {
                self.skip(file, &name, "channel absent");
                continue;
            };
            if cycles.is_empty() {
                self.skip(file, &name, "no cycles");
                continue;
            }
            match self.append_cycles(&name, recording, cycles) {
                Ok(n) => {
                    added += n;
                    debug!(file, channel = %name, cycles = n, "Cycles aggregated");
                }
                Err(e) => self.skip(file, &name, &e.to_string()),
            }
        }
        added
    }

    fn append_cycles(
        &mut self,
        name: &str,
        recording: &TrialRecording,
        cycles: &ChannelCycles,
    ) -> Result<usize, ExportError> {
        let matrix = self
            .channels
            .entry(name.to_string())
            .or_insert_with(|| ChannelMatrix::new(self.cycle_len));

        let before = matrix.cycle_count();
        for curve in &cycles.curves {
            matrix.push_cycle(name, curve.clone())?;
        }

        if self.derive.contains(name) {
            let dts = self.delta_t.entry(name.to_string()).or_default();
            for span in &cycles.spans {
                let duration = span.len() as f64 / recording.frame_rate;
                dts.push(duration / self.cycle_len as f64);
            }
        }

        Ok(matrix.cycle_count() - before)
    }

    fn skip(&mut self, file: &str, channel: &str, reason: &str) {
        counter!("gaitmark_export_channels_skipped_total").increment(1);
        warn!(file, channel, reason, "Channel skipped");
        self.skipped.push(format!("{file}:{channel} ({reason})"));
    }

    /// Close the aggregation: compute derivative channels and hand the
    /// matrices over.
    pub fn finish(mut self) -> BTreeMap<String, ChannelMatrix> {
        let mut derived = BTreeMap::new();
        for name in &self.derive {
            let (Some(matrix), Some(dts)) = (self.channels.get(name), self.delta_t.get(name))
            else {
                continue;
            };
            if dts.len() != matrix.cycle_count() {
                warn!(
                    channel = %name,
                    durations = dts.len(),
                    cycles = matrix.cycle_count(),
                    "Derivative skipped: cycle durations incomplete"
                );
                continue;
            }
            derived.insert(format!("{name}_dt"), matrix.derivative(dts));
        }
        self.channels.append(&mut derived);
        self.channels
    }
}

//! Batch exporter - fold a directory of recordings into aggregates.

use std::path::{Path, PathBuf};

use chrono::Utc;
use metrics::counter;
use tracing::{info, instrument, warn};

use contracts::ExportProfile;

use crate::aggregate::Aggregator;
use crate::error::ExportError;
use crate::recording::TrialRecording;
use crate::writer::{write_aggregate, AggregateFile, ExportFormat, ExportMeta};

/// Outcome counters of one batch run.
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Recording files found in the input directory
    pub files_seen: usize,

    /// Files successfully folded into the aggregates
    pub files_loaded: usize,

    /// Files skipped: unreadable, or tag not in the allow-list
    pub files_skipped: usize,

    /// Model cycles aggregated
    pub model_cycles: usize,

    /// EMG cycles aggregated
    pub emg_cycles: usize,

    /// Channels skipped with a diagnostic
    pub channels_skipped: usize,
}

/// Offline aggregation utility over archived trial recordings.
pub struct BatchExporter {
    profile: ExportProfile,
    format: ExportFormat,
}

impl BatchExporter {
    pub fn new(profile: ExportProfile, format: ExportFormat) -> Self {
        Self { profile, format }
    }

    /// Aggregate every readable, allow-listed recording under
    /// `input_dir` and write `model_aggregate` / `emg_aggregate` files
    /// into `output_dir`.
    ///
    /// Per-file and per-channel failures are recovered locally; only
    /// IO/serialization failures of the final write abort the run.
    #[instrument(name = "batch_export", skip(self), fields(input = %input_dir.display()))]
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<ExportStats, ExportError> {
        let mut stats = ExportStats::default();

        let mut model = Aggregator::new(
            self.profile.model_cycle_len,
            &self.profile.model_channels,
            &self.profile.derive_channels,
        );
        let mut emg = Aggregator::new(self.profile.emg_cycle_len, &self.profile.emg_channels, &[]);
        let mut source_files = Vec::new();

        for path in recording_paths(input_dir)? {
            stats.files_seen += 1;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let recording = match TrialRecording::load(&path) {
                Ok(r) => r,
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Recording skipped");
                    stats.files_skipped += 1;
                    continue;
                }
            };

            if !self.profile.allowed_tags.iter().any(|t| *t == recording.tag) {
                info!(file = %file_name, tag = %recording.tag, "Tag not allowed, skipping");
                counter!("gaitmark_export_tags_rejected_total").increment(1);
                stats.files_skipped += 1;
                continue;
            }

            stats.model_cycles += model.add_recording(&file_name, &recording, &recording.model);
            stats.emg_cycles += emg.add_recording(&file_name, &recording, &recording.emg);
            stats.files_loaded += 1;
            source_files.push(file_name);
        }

        stats.channels_skipped = model.skipped.len() + emg.skipped.len();

        self.write_group("model_aggregate", output_dir, model, &source_files)?;
        self.write_group("emg_aggregate", output_dir, emg, &source_files)?;

        info!(
            files = stats.files_loaded,
            model_cycles = stats.model_cycles,
            emg_cycles = stats.emg_cycles,
            skipped_channels = stats.channels_skipped,
            "Batch export finished"
        );
        Ok(stats)
    }

    fn write_group(
        &self,
        stem: &str,
        output_dir: &Path,
        aggregator: Aggregator,
        source_files: &[String],
    ) -> Result<(), ExportError> {
        let skipped = aggregator.skipped.clone();
        let channels = aggregator.finish();
        if channels.is_empty() {
            return Ok(());
        }

        let aggregate = AggregateFile {
            meta: ExportMeta {
                created_at: Utc::now(),
                allowed_tags: self.profile.allowed_tags.clone(),
                source_files: source_files.to_vec(),
                skipped,
            },
            channels,
        };
        let path = output_dir.join(format!("{stem}.{}", self.format.extension()));
        write_aggregate(&path, &aggregate, self.format)
    }
}

/// Sorted list of `.json` recording files under `dir`.
fn recording_paths(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::ChannelCycles;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn profile() -> ExportProfile {
        ExportProfile {
            model_channels: vec!["RKneeAnglesX".into()],
            emg_channels: vec!["RGas".into()],
            derive_channels: vec![],
            allowed_tags: vec!["T1".into()],
            model_cycle_len: 101,
            emg_cycle_len: 1000,
        }
    }

    fn write_recording(dir: &Path, name: &str, tag: &str, with_emg: bool) {
        let mut model = BTreeMap::new();
        model.insert(
            "RKneeAnglesX".to_string(),
            ChannelCycles {
                curves: vec![vec![1.0; 101]],
                spans: vec![],
            },
        );
        let mut emg = BTreeMap::new();
        if with_emg {
            emg.insert(
                "RGas".to_string(),
                ChannelCycles {
                    curves: vec![vec![0.5; 1000]],
                    spans: vec![],
                },
            );
        }
        let recording = TrialRecording {
            trial: name.to_string(),
            tag: tag.to_string(),
            frame_rate: 100.0,
            model,
            emg,
        };
        let json = serde_json::to_string(&recording).unwrap();
        std::fs::write(dir.join(name), json).unwrap();
    }

    #[test]
    fn test_batch_export_end_to_end() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        write_recording(input.path(), "a.json", "T1", true);
        write_recording(input.path(), "b.json", "T1", false);
        write_recording(input.path(), "c.json", "E9", true); // tag rejected
        std::fs::write(input.path().join("broken.json"), "not json").unwrap();

        let exporter = BatchExporter::new(profile(), ExportFormat::Json);
        let stats = exporter.run(input.path(), output.path()).unwrap();

        assert_eq!(stats.files_seen, 4);
        assert_eq!(stats.files_loaded, 2);
        assert_eq!(stats.files_skipped, 2);
        assert_eq!(stats.model_cycles, 2);
        assert_eq!(stats.emg_cycles, 1);
        // b.json has no RGas channel
        assert_eq!(stats.channels_skipped, 1);

        assert!(output.path().join("model_aggregate.json").exists());
        assert!(output.path().join("emg_aggregate.json").exists());
    }

    #[test]
    fn test_empty_input_dir_writes_nothing() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        let exporter = BatchExporter::new(profile(), ExportFormat::Json);
        let stats = exporter.run(input.path(), output.path()).unwrap();

        assert_eq!(stats.files_seen, 0);
        assert!(!output.path().join("model_aggregate.json").exists());
    }
}

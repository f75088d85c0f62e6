//! Detection metrics collection.
//!
//! Counters/gauges go to the `metrics` facade (scraped via Prometheus
//! when the endpoint is enabled); `DetectionAggregator` keeps the same
//! numbers in memory for the end-of-run summary printout.

use contracts::GaitEvent;
use metrics::{counter, gauge, histogram};

/// Flattened per-trial detection figures, fed to both the metrics
/// facade and the in-memory aggregator.
#[derive(Debug, Clone, Default)]
pub struct DetectionSample {
    /// Whether force-plate calibration replaced the default thresholds
    pub calibration_applied: bool,

    /// Thresholds actually used (fractions of max speed)
    pub threshold_fall: f64,
    pub threshold_rise: f64,

    /// Final event counts per side
    pub left_strikes: usize,
    pub left_offs: usize,
    pub right_strikes: usize,
    pub right_offs: usize,

    /// Peak foot-center speed per side (units of the capture system)
    pub max_speed_left: f64,
    pub max_speed_right: f64,
}

impl DetectionSample {
    pub fn total_events(&self) -> usize {
        self.left_strikes + self.left_offs + self.right_strikes + self.right_offs
    }
}

/// Record one trial's detection figures.
pub fn record_detection(sample: &DetectionSample) {
    counter!("gaitmark_trials_detected_total").increment(1);

    if sample.calibration_applied {
        counter!("gaitmark_calibrated_trials_total").increment(1);
    }

    gauge!("gaitmark_threshold_fall").set(sample.threshold_fall);
    gauge!("gaitmark_threshold_rise").set(sample.threshold_rise);
    histogram!("gaitmark_threshold_fall_hist").record(sample.threshold_fall);
    histogram!("gaitmark_threshold_rise_hist").record(sample.threshold_rise);

    counter!("gaitmark_events_detected_total", "side" => "left", "kind" => "strike")
        .increment(sample.left_strikes as u64);
    counter!("gaitmark_events_detected_total", "side" => "left", "kind" => "off")
        .increment(sample.left_offs as u64);
    counter!("gaitmark_events_detected_total", "side" => "right", "kind" => "strike")
        .increment(sample.right_strikes as u64);
    counter!("gaitmark_events_detected_total", "side" => "right", "kind" => "off")
        .increment(sample.right_offs as u64);

    histogram!("gaitmark_max_speed", "side" => "left").record(sample.max_speed_left);
    histogram!("gaitmark_max_speed", "side" => "right").record(sample.max_speed_right);
}

/// Record events written to the event store
pub fn record_events_written(events: &[GaitEvent]) {
    for event in events {
        counter!(
            "gaitmark_events_written_total",
            "side" => event.side.as_str(),
            "kind" => event.kind.as_str()
        )
        .increment(1);
    }
}

/// In-memory aggregation of detection figures across trials.
#[derive(Debug, Clone, Default)]
pub struct DetectionAggregator {
    /// Trials processed
    pub total_trials: u64,

    /// Trials whose thresholds were calibrated from the plate
    pub calibrated_trials: u64,

    /// Total events detected
    pub total_events: u64,

    /// Fall-threshold statistics
    pub fall_stats: RunningStats,

    /// Rise-threshold statistics
    pub rise_stats: RunningStats,

    /// Peak-speed statistics across both sides
    pub speed_stats: RunningStats,
}

impl DetectionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one trial's figures into the aggregate
    pub fn update(&mut self, sample: &DetectionSample) {
        self.total_trials += 1;
        if sample.calibration_applied {
            self.calibrated_trials += 1;
        }
        self.total_events += sample.total_events() as u64;

        self.fall_stats.push(sample.threshold_fall);
        self.rise_stats.push(sample.threshold_rise);
        self.speed_stats.push(sample.max_speed_left);
        self.speed_stats.push(sample.max_speed_right);
    }

    /// Produce a summary report
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            total_trials: self.total_trials,
            calibrated_trials: self.calibrated_trials,
            total_events: self.total_events,
            calibration_rate: if self.total_trials > 0 {
                self.calibrated_trials as f64 / self.total_trials as f64 * 100.0
            } else {
                0.0
            },
            threshold_fall: StatsSummary::from(&self.fall_stats),
            threshold_rise: StatsSummary::from(&self.rise_stats),
            max_speed: StatsSummary::from(&self.speed_stats),
        }
    }

    /// Reset the aggregate
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Summary report
#[derive(Debug, Clone, Default)]
pub struct DetectionSummary {
    pub total_trials: u64,
    pub calibrated_trials: u64,
    pub total_events: u64,
    pub calibration_rate: f64,
    pub threshold_fall: StatsSummary,
    pub threshold_rise: StatsSummary,
    pub max_speed: StatsSummary,
}

impl std::fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Detection Summary ===")?;
        writeln!(f, "Trials: {}", self.total_trials)?;
        writeln!(
            f,
            "Calibrated from force plate: {} ({:.1}%)",
            self.calibrated_trials, self.calibration_rate
        )?;
        writeln!(f, "Events detected: {}", self.total_events)?;
        writeln!(f, "Fall threshold: {}", self.threshold_fall)?;
        writeln!(f, "Rise threshold: {}", self.threshold_rise)?;
        writeln!(f, "Peak speed: {}", self.max_speed)?;
        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(v);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = DetectionAggregator::new();

        let sample = DetectionSample {
            calibration_applied: true,
            threshold_fall: 0.25,
            threshold_rise: 0.6,
            left_strikes: 0,
            left_offs: 0,
            right_strikes: 1,
            right_offs: 1,
            max_speed_left: 0.0,
            max_speed_right: 31.5,
        };

        aggregator.update(&sample);

        assert_eq!(aggregator.total_trials, 1);
        assert_eq!(aggregator.calibrated_trials, 1);
        assert_eq!(aggregator.total_events, 2);
        assert!((aggregator.fall_stats.mean() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = DetectionAggregator::new();
        aggregator.update(&DetectionSample {
            calibration_applied: true,
            threshold_fall: 0.2,
            threshold_rise: 0.5,
            right_strikes: 1,
            ..Default::default()
        });

        let output = format!("{}", aggregator.summary());
        assert!(output.contains("Trials: 1"));
        assert!(output.contains("100.0%"));
    }
}

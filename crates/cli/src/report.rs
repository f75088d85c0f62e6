//! Detection report output.
//!
//! The serialized `Detection` (speed signals plus fixed-threshold and
//! calibrated event frames per side) is the handoff to the comparison
//! figure renderer; the console comparison covers quick checks at the
//! capture station.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use detector::{Detection, SideDetection};

/// Write the full detection report as JSON.
pub fn write_report(path: &Path, detection: &Detection) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), detection)
        .context("Failed to serialize detection report")?;
    Ok(())
}

/// Print fixed-threshold vs calibrated frames per side.
pub fn print_comparison(detection: &Detection) {
    println!("\n=== Detection Comparison ===\n");
    if detection.calibration.applied {
        println!(
            "Thresholds calibrated from {} side force-plate contact:",
            detection
                .calibration
                .source_side
                .map(|s| s.as_str())
                .unwrap_or("?")
        );
    } else {
        println!("Default thresholds (calibration not applied):");
    }
    println!(
        "  fall = {:.3} x max speed, rise = {:.3} x max speed",
        detection.calibration.threshold_fall, detection.calibration.threshold_rise
    );
    println!(
        "  force plate: strike frame {}, toe-off frame {} (window-relative)\n",
        detection.calibration.fp_strike, detection.calibration.fp_toeoff
    );

    print_side(&detection.left);
    print_side(&detection.right);
}

fn print_side(side: &SideDetection) {
    println!("{}:", side.side);
    println!(
        "  fixed thresholds : strikes {:?}, toe-offs {:?}",
        side.initial.strikes, side.initial.offs
    );
    println!(
        "  calibrated       : strikes {:?}, toe-offs {:?}",
        side.calibrated.strikes, side.calibrated.offs
    );
}

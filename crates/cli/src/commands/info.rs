//! `info` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use contracts::AnalysisProfile;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(profile = %args.profile.display(), "Reading profile");

    if !args.profile.exists() {
        anyhow::bail!("Profile file not found: {}", args.profile.display());
    }

    let profile = config_loader::ConfigLoader::load_from_path(&args.profile)
        .with_context(|| format!("Failed to load profile from {}", args.profile.display()))?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&profile)
            .context("Failed to serialize profile")?;
        println!("{}", json);
    } else {
        print_profile(&args.profile.display().to_string(), &profile);
    }

    Ok(())
}

fn print_profile(path: &str, profile: &AnalysisProfile) {
    println!("\n=== Analysis Profile ===\n");
    println!("File: {}", path);
    println!("Version: {:?}", profile.version);

    println!("\nDetector:");
    println!("  Fall threshold: {:.2}", profile.detector.threshold_fall);
    println!("  Rise threshold: {:.2}", profile.detector.threshold_rise);
    println!(
        "  Force contact fraction: {:.3}",
        profile.detector.force_contact_fraction
    );
    println!(
        "  Median kernels: speed {}, force {}",
        profile.detector.speed_median_len, profile.detector.force_median_len
    );
    println!(
        "  Max calibration offset: {} frames",
        profile.detector.max_calibration_offset
    );

    println!("\nMarkers:");
    println!(
        "  Left:  heel {}, toe {}, ankle {}",
        profile.markers.left.heel, profile.markers.left.toe, profile.markers.left.ankle
    );
    println!(
        "  Right: heel {}, toe {}, ankle {}",
        profile.markers.right.heel, profile.markers.right.toe, profile.markers.right.ankle
    );

    println!("\nExport:");
    println!(
        "  Model channels ({} samples/cycle): {}",
        profile.export.model_cycle_len,
        profile.export.model_channels.len()
    );
    for channel in &profile.export.model_channels {
        let derived = profile.export.derive_channels.contains(channel);
        println!(
            "    - {}{}",
            channel,
            if derived { " (+ derivative)" } else { "" }
        );
    }
    println!(
        "  EMG channels ({} samples/cycle): {}",
        profile.export.emg_cycle_len,
        profile.export.emg_channels.len()
    );
    for channel in &profile.export.emg_channels {
        println!("    - {}", channel);
    }
    println!("  Allowed tags: {:?}", profile.export.allowed_tags);

    println!();
}

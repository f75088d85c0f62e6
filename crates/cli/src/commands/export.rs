//! `export` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use export::BatchExporter;

use crate::cli::ExportArgs;

/// Execute the `export` command
pub fn run_export(args: &ExportArgs) -> Result<()> {
    if !args.profile.exists() {
        anyhow::bail!("Profile file not found: {}", args.profile.display());
    }
    if !args.input.is_dir() {
        anyhow::bail!("Input is not a directory: {}", args.input.display());
    }

    info!(profile = %args.profile.display(), "Loading analysis profile");
    let profile = config_loader::ConfigLoader::load_from_path(&args.profile)
        .with_context(|| format!("Failed to load profile from {}", args.profile.display()))?;

    if profile.export.model_channels.is_empty() && profile.export.emg_channels.is_empty() {
        warn!("Profile selects no export channels - nothing to aggregate");
    }

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        model_channels = profile.export.model_channels.len(),
        emg_channels = profile.export.emg_channels.len(),
        tags = ?profile.export.allowed_tags,
        "Starting batch export"
    );

    let exporter = BatchExporter::new(profile.export, args.format.into());
    let stats = exporter
        .run(&args.input, &args.output)
        .context("Batch export failed")?;

    println!("\n=== Export Summary ===\n");
    println!("Files found:      {}", stats.files_seen);
    println!("Files aggregated: {}", stats.files_loaded);
    println!("Files skipped:    {}", stats.files_skipped);
    println!("Model cycles:     {}", stats.model_cycles);
    println!("EMG cycles:       {}", stats.emg_cycles);
    println!("Channels skipped: {}", stats.channels_skipped);

    info!("Batch export finished");
    Ok(())
}

//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    profile_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ProfileSummary>,
}

#[derive(Serialize)]
struct ProfileSummary {
    version: String,
    threshold_fall: f64,
    threshold_rise: f64,
    model_channel_count: usize,
    emg_channel_count: usize,
    allowed_tags: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(profile = %args.profile.display(), "Validating profile");

    let result = validate_profile(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Profile validation failed")
    }
}

fn validate_profile(args: &ValidateArgs) -> ValidationResult {
    let profile_path = args.profile.display().to_string();

    // Check file exists
    if !args.profile.exists() {
        return ValidationResult {
            valid: false,
            profile_path,
            error: Some(format!("File not found: {}", args.profile.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.profile) {
        Ok(profile) => {
            let warnings = collect_warnings(&profile);

            ValidationResult {
                valid: true,
                profile_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ProfileSummary {
                    version: format!("{:?}", profile.version),
                    threshold_fall: profile.detector.threshold_fall,
                    threshold_rise: profile.detector.threshold_rise,
                    model_channel_count: profile.export.model_channels.len(),
                    emg_channel_count: profile.export.emg_channels.len(),
                    allowed_tags: profile.export.allowed_tags.clone(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            profile_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect profile warnings (non-fatal issues)
fn collect_warnings(profile: &contracts::AnalysisProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.export.model_channels.is_empty() && profile.export.emg_channels.is_empty() {
        warnings.push("No export channels configured - the export command will do nothing".into());
    }

    if profile.detector.max_calibration_offset > 30 {
        warnings.push(format!(
            "max_calibration_offset of {} frames is permissive - poor force-plate \
             matches may still calibrate thresholds",
            profile.detector.max_calibration_offset
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Profile is valid: {}", result.profile_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!(
                "  Thresholds: fall {:.2}, rise {:.2}",
                summary.threshold_fall, summary.threshold_rise
            );
            println!("  Model channels: {}", summary.model_channel_count);
            println!("  EMG channels: {}", summary.emg_channel_count);
            println!("  Allowed tags: {:?}", summary.allowed_tags);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Profile is invalid: {}", result.profile_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

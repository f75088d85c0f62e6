//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// gaitmark - gait event autodetection and batch export
#[derive(Parser, Debug)]
#[command(
    name = "gaitmark",
    author,
    version,
    about = "Gait event autodetection toolkit",
    long_about = "A clinical gait-lab toolkit.\n\n\
                  Detects foot-strike and foot-off events from marker trajectories \n\
                  with force-plate-calibrated thresholds, writes them back to the \n\
                  trial's event store, and batch-exports archived recordings into \n\
                  aggregate matrices for statistical analysis."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "GAITMARK_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "GAITMARK_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Autodetect gait events for one trial and write them to its event store
    Mark(MarkArgs),

    /// Aggregate archived recordings into export matrices
    Export(ExportArgs),

    /// Validate an analysis profile without running
    Validate(ValidateArgs),

    /// Display analysis profile information
    Info(InfoArgs),
}

/// Arguments for the `mark` command
#[derive(Parser, Debug, Clone)]
pub struct MarkArgs {
    /// Trial snapshot to analyze
    #[arg(env = "GAITMARK_TRIAL")]
    pub trial: PathBuf,

    /// Analysis profile (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "GAITMARK_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Detect events but do not touch the event store
    #[arg(long)]
    pub dry_run: bool,

    /// Keep previous automatically generated events instead of
    /// clearing them before writing
    #[arg(long)]
    pub keep_events: bool,

    /// Write the detection report (speed signals + event frames) as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Save the updated snapshot here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "GAITMARK_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Directory of archived trial recordings
    #[arg(short, long, env = "GAITMARK_EXPORT_INPUT")]
    pub input: PathBuf,

    /// Output directory for the aggregate files
    #[arg(short, long, default_value = "./export", env = "GAITMARK_EXPORT_OUTPUT")]
    pub output: PathBuf,

    /// Analysis profile with the [export] channel selection
    #[arg(short, long, env = "GAITMARK_PROFILE")]
    pub profile: PathBuf,

    /// Aggregate serialization format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormatArg,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the profile file to validate
    #[arg(short, long, default_value = "profile.toml")]
    pub profile: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to the profile file
    #[arg(short, long, default_value = "profile.toml")]
    pub profile: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Aggregate serialization format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ExportFormatArg {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Compact bincode
    Bincode,
}

impl From<ExportFormatArg> for export::ExportFormat {
    fn from(format: ExportFormatArg) -> Self {
        match format {
            ExportFormatArg::Json => export::ExportFormat::Json,
            ExportFormatArg::Bincode => export::ExportFormat::Bincode,
        }
    }
}

//! Aggregate serialization.
//!
//! JSON for human-inspectable output, bincode for compact interchange.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::aggregate::ChannelMatrix;
use crate::error::ExportError;

/// Output serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Compact bincode
    Bincode,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Bincode => "bin",
        }
    }
}

/// Provenance metadata stored alongside the matrices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMeta {
    /// When the aggregate was produced
    pub created_at: DateTime<Utc>,

    /// Trial tags that were accepted
    pub allowed_tags: Vec<String>,

    /// Recording files folded into the aggregate
    pub source_files: Vec<String>,

    /// (file, channel) pairs skipped during aggregation
    pub skipped: Vec<String>,
}

/// One serialized aggregate: metadata plus the channel matrices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateFile {
    pub meta: ExportMeta,
    pub channels: BTreeMap<String, ChannelMatrix>,
}

/// Write an aggregate to `path` in the requested format.
#[instrument(name = "write_aggregate", skip(aggregate), fields(path = %path.display()))]
pub fn write_aggregate(
    path: &Path,
    aggregate: &AggregateFile,
    format: ExportFormat,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => serde_json::to_writer_pretty(writer, aggregate)
            .map_err(|e| ExportError::serialize("json", e.to_string()))?,
        ExportFormat::Bincode => bincode::serialize_into(writer, aggregate)
            .map_err(|e| ExportError::serialize("bincode", e.to_string()))?,
    }

    debug!(channels = aggregate.channels.len(), "Aggregate written");
    Ok(())
}

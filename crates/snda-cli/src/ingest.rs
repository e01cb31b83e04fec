//! CSV edge-list ingestion.
//!
//! An edge list is a headered CSV with at least the columns `Node1`, `Node2`
//! and `Timestamp` (Unix epoch seconds). Other columns are ignored, and the
//! three required ones may appear in any order.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use snda_core::{CoreError, Edge, ErrorCode};
use thiserror::Error;
use tracing::{debug, instrument};

/// Columns every edge list must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Node1", "Node2", "Timestamp"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{}: missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("{}: record {record}: invalid timestamp '{value}'", path.display())]
    BadTimestamp {
        path: PathBuf,
        record: u64,
        value: String,
    },

    #[error("{}: record {record}: {source}", path.display())]
    OutOfRange {
        path: PathBuf,
        record: u64,
        source: CoreError,
    },

    #[error("{}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl IngestError {
    /// Machine-readable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::OutOfRange { .. } => ErrorCode::TimestampOutOfRange,
            Self::MissingColumns { .. } | Self::BadTimestamp { .. } | Self::Csv { .. } => {
                ErrorCode::MalformedInput
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    #[serde(rename = "Node1")]
    node1: String,
    #[serde(rename = "Node2")]
    node2: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

/// Read an edge list from a CSV file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read, lacks a required
/// column, or holds a timestamp that is not an epoch-seconds number.
#[instrument]
pub fn read_edges(path: &Path) -> Result<Vec<Edge>, IngestError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let edges = parse_edges(reader, path)?;
    debug!(edges = edges.len(), "edge list loaded");
    Ok(edges)
}

/// CSV settings for edge lists. Header names are trimmed so the column check
/// and record deserialization agree on `Node1, Node2` style headers.
#[must_use]
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::Headers);
    builder
}

/// Parse an edge list from a CSV reader built with [`reader_builder`].
/// `origin` is only used in errors.
///
/// # Errors
///
/// See [`read_edges`].
pub fn parse_edges<R: Read>(
    mut reader: csv::Reader<R>,
    origin: &Path,
) -> Result<Vec<Edge>, IngestError> {
    let csv_err = |source| IngestError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: origin.to_path_buf(),
            missing,
        });
    }

    let mut edges = Vec::new();
    for (i, row) in reader.deserialize::<EdgeRecord>().enumerate() {
        let row = row.map_err(csv_err)?;
        // Record numbers are 1-based and exclude the header.
        let record = i as u64 + 1;
        let secs = parse_epoch_seconds(&row.timestamp).ok_or_else(|| IngestError::BadTimestamp {
            path: origin.to_path_buf(),
            record,
            value: row.timestamp.clone(),
        })?;
        let edge =
            Edge::from_unix(row.node1, row.node2, secs).map_err(|source| IngestError::OutOfRange {
                path: origin.to_path_buf(),
                record,
                source,
            })?;
        edges.push(edge);
    }
    Ok(edges)
}

/// Epoch seconds as an integer, or a float with its fraction dropped.
#[allow(clippy::cast_possible_truncation)]
fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.abs() < 9.0e15)
            .map(|f| f.floor() as i64)
    })
}

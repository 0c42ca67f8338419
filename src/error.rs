//! Error types for report loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// A decoded JSON value that does not describe a usable telemetry report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The top-level JSON value is not an object.
    #[error("report must be a JSON object")]
    NotAnObject,

    /// A required top-level field is absent or null.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// All required fields are present but a value has the wrong shape.
    #[error("invalid report: {0}")]
    InvalidShape(String),

    /// `op_timeline` contains no operations.
    #[error("op_timeline must contain at least one operation")]
    EmptyTimeline,

    /// `l1_usage.total_bytes` is zero, so usage cannot be computed.
    #[error("l1_usage.total_bytes must be greater than zero")]
    ZeroTotalBytes,
}

/// Failure to load a report file. Each kind ends the load attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file name does not end in `.json`.
    #[error("Please drop a .json file")]
    NotJson { path: PathBuf },

    /// The file could not be read.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// The contents are not valid JSON.
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    /// The JSON is valid but is not a telemetry report.
    #[error("{0}")]
    Schema(#[from] ValidationError),
}

impl LoadError {
    /// True for errors raised before the file contents were examined.
    pub fn is_rejected_by_name(&self) -> bool {
        matches!(self, LoadError::NotJson { .. })
    }
}

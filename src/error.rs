//! Error types for the extraction pipeline.

use std::path::PathBuf;

/// Terminal failure of a single extraction run.
///
/// None of these are retried. The run reports the condition and stops
/// before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed header: \"{marker}\" not found before end of input")]
    MalformedHeader { marker: &'static str },

    #[error("unknown variable key \"{0}\"")]
    UnknownVariable(String),

    #[error("invalid reduction mode \"{0}\" (expected 's' or 'a')")]
    InvalidMode(String),

    #[error(
        "unexpected series length: collected {collected} samples, need at least {required} for an hourly year"
    )]
    UnexpectedSeriesLength { collected: usize, required: usize },

    #[error("invalid sample \"{value}\" on line {line}")]
    InvalidSample { line: u64, value: String },

    #[error("failed to read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write \"{}\": {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed log record: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be turned into a complete table.
///
/// Fatal at startup: nothing can be rendered without data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON")]
    Json(#[from] serde_json::Error),
    #[error("reading parquet")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("decoding arrow batch")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("row {row} has {found} values but the header declares {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("malformed input: {0}")]
    Malformed(String),
}

/// A single aggregation request failed. Scoped to one panel, never the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The request names a column the table does not have. Indicates a caller bug.
    #[error("column '{0}' does not exist in the dataset")]
    InvalidColumn(String),
    /// A mean was requested over a column that is not numeric.
    #[error("column '{0}' is categorical and cannot be averaged")]
    NonNumericTarget(String),
    /// No non-missing values were available for `target` in `group`.
    #[error("no respondents with a value for '{target}' in group '{group}'")]
    EmptyPartition { group: String, target: String },
}

impl PipelineError {
    /// Whether the failure means "no data for this selection" rather than a bug.
    pub fn is_empty_partition(&self) -> bool {
        matches!(self, PipelineError::EmptyPartition { .. })
    }
}

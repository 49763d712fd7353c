//! Catalog loading error types.

use crate::domain::StopId;

/// Errors that prevent a stop catalog from being built.
///
/// All of these are fatal at start-up: a catalog is either fully valid or
/// not constructed at all.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Dataset file could not be read
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// CSV structure could not be parsed
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// Two rows share the same stop_id
    #[error("duplicate stop_id '{0}'")]
    DuplicateStopId(StopId),

    /// A row failed validation (1-based data row)
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// The dataset has a header but no rows
    #[error("dataset contains no stops")]
    Empty,
}

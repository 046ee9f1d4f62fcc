//! Error types for CSV interchange.
//!
//! These are file-level failures that abort a whole import or export.
//! Problems confined to a single row are collected in the
//! [`ImportReport`](crate::ImportReport) instead.

use std::path::PathBuf;

use stockroom_core::FailureKind;
use stockroom_sqlite::StoreError;
use thiserror::Error;

/// Errors that can occur while importing or exporting CSV.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The CSV file could not be opened or created.
    #[error("cannot {action} '{}': {source}", .path.display())]
    FileError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while streaming rows.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV reading or writing failure.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The header row is missing or does not match `sku,name,quantity,price`.
    #[error("invalid header '{found}': expected 'sku,name,quantity,price'")]
    InvalidHeader { found: String },

    /// Store failure that is not specific to one row.
    #[error(transparent)]
    StoreError(#[from] StoreError),
}

impl InterchangeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::FileError { .. } | Self::IoError(_) => FailureKind::IoFailure,
            Self::CsvError(err) if err.is_io_error() => FailureKind::IoFailure,
            Self::CsvError(_) | Self::InvalidHeader { .. } => FailureKind::InvalidValue,
            Self::StoreError(err) => err.kind(),
        }
    }
}

/// Convenience alias for results with [`InterchangeError`].
pub type Result<T> = std::result::Result<T, InterchangeError>;

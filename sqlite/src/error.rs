//! Error types for item store operations.
//!
//! Provides a unified error type covering database access, row conversion,
//! and the business-rule failures the store enforces.

use stockroom_core::{FailureKind, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An item with this SKU already exists.
    #[error("sku '{0}' already exists; use update instead")]
    DuplicateKey(String),

    /// No item with this SKU exists.
    #[error("sku '{0}' not found")]
    NotFound(String),

    /// A field value violated an item rule.
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// Stored row could not be converted back into an item.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::DuplicateKey(_) => FailureKind::DuplicateKey,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::InvalidValue(_) => FailureKind::InvalidValue,
            Self::ConversionError(_) | Self::DatabaseError(_) => FailureKind::StorageFailure,
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

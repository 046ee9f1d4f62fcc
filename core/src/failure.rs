//! Failure taxonomy shared by all components.
//!
//! Each crate keeps its own error enum; every variant maps onto one
//! [`FailureKind`], which owns the process exit code.

use std::fmt;

/// Category of a reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Referenced SKU does not exist.
    NotFound,
    /// SKU already exists on create.
    DuplicateKey,
    /// Negative, non-numeric, or missing required field.
    InvalidValue,
    /// Free text could not be mapped to a command.
    UnparseableInput,
    /// A file could not be read or written.
    IoFailure,
    /// Unexpected storage or configuration error.
    StorageFailure,
}

impl FailureKind {
    /// Process exit code for this failure kind. Never zero.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::StorageFailure => 1,
            Self::NotFound => 2,
            Self::DuplicateKey => 3,
            Self::InvalidValue => 4,
            Self::UnparseableInput => 5,
            Self::IoFailure => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::DuplicateKey => "DuplicateKey",
            Self::InvalidValue => "InvalidValue",
            Self::UnparseableInput => "UnparseableInput",
            Self::IoFailure => "IOFailure",
            Self::StorageFailure => "StorageFailure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

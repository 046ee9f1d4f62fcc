//! Errors surfaced by the `stockroom` binary.

use std::path::PathBuf;

use stockroom_agent::AgentError;
use stockroom_core::FailureKind;
use stockroom_interchange::InterchangeError;
use stockroom_sqlite::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Interchange(#[from] InterchangeError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("cannot read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Some CSV rows were rejected; the rest were imported.
    #[error("{failed} of {total} row(s) were not imported")]
    ImportIncomplete { failed: usize, total: usize },
}

impl CliError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Store(err) => err.kind(),
            Self::Interchange(err) => err.kind(),
            Self::Agent(err) => err.kind(),
            Self::ConfigRead { .. } => FailureKind::IoFailure,
            Self::ConfigParse { .. } | Self::Output(_) => FailureKind::StorageFailure,
            Self::ImportIncomplete { .. } => FailureKind::InvalidValue,
        }
    }
}

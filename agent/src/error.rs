//! Error types for the natural-language adapter.

use stockroom_core::FailureKind;
use thiserror::Error;

/// Neither the service nor the keyword rules produced a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// Input was empty or whitespace-only.
    #[error("nothing to interpret: input is empty")]
    EmptyInput,

    /// Input could not be mapped to a verb with all required arguments.
    #[error("could not interpret '{input}': {reason}")]
    Unparseable { input: String, reason: String },
}

impl AgentError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::UnparseableInput
    }
}

/// Failures talking to the generative-text service.
///
/// Never surfaced to the user: the adapter treats every one of these as
/// "service unavailable" and falls back to the keyword rules.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure, including timeouts.
    #[error("request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("service returned HTTP {status}: {body}")]
    StatusError { status: u16, body: String },

    /// Successful response without any candidate text.
    #[error("service returned no text")]
    EmptyResponse,
}

//! Service-first interpretation with a keyword-rule fallback.

use stockroom_core::Command;
use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::reply::{ServiceReply, build_prompt, decode_reply};
use crate::rules;
use crate::service::{CompletionService, GeminiClient};

/// Which path produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Service,
    Rules,
}

/// A command together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub command: Command,
    pub source: Source,
}

/// Turns free text into a [`Command`].
///
/// With a service attached, the text is sent there first. A transport
/// failure, a non-JSON reply, an unknown verb, or a missing argument all
/// count as "no answer" and the keyword rules take over. The service's
/// failure is logged but never returned.
pub struct Interpreter {
    service: Option<Box<dyn CompletionService>>,
}

impl Interpreter {
    /// Interpreter that only uses the keyword rules.
    pub fn offline() -> Self {
        Self { service: None }
    }

    pub fn with_service(service: impl CompletionService + 'static) -> Self {
        Self {
            service: Some(Box::new(service)),
        }
    }

    /// Builds an interpreter from resolved configuration.
    ///
    /// The service is attached only when a credential is present and the
    /// configuration does not disable it. A client that cannot be built is
    /// logged and treated as absent.
    pub fn from_config(config: &AgentConfig) -> Self {
        let Some(api_key) = config.service_key() else {
            debug!("generative-text service not configured, using keyword rules");
            return Self::offline();
        };
        match GeminiClient::new(&config.service, api_key) {
            Ok(client) => Self::with_service(client),
            Err(err) => {
                warn!(error = %err, "cannot build service client, using keyword rules");
                Self::offline()
            }
        }
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Interprets one sentence.
    ///
    /// # Errors
    ///
    /// - [`AgentError::EmptyInput`] for empty or whitespace-only text
    /// - [`AgentError::Unparseable`] when the service gave no usable command
    ///   and the keyword rules could not map the text either
    pub fn interpret(&self, text: &str) -> Result<Interpretation, AgentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AgentError::EmptyInput);
        }

        if let Some(command) = self.ask_service(text) {
            info!(verb = %command.verb(), "interpreted by service");
            return Ok(Interpretation {
                command,
                source: Source::Service,
            });
        }

        let command = rules::parse(text)?;
        info!(verb = %command.verb(), "interpreted by keyword rules");
        Ok(Interpretation {
            command,
            source: Source::Rules,
        })
    }

    fn ask_service(&self, text: &str) -> Option<Command> {
        let service = self.service.as_ref()?;
        let raw = match service.complete(&build_prompt(text)) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "service unavailable, falling back to keyword rules");
                return None;
            }
        };
        match decode_reply(&raw) {
            ServiceReply::ValidCommand(command) => Some(command),
            ServiceReply::Malformed(reason) => {
                warn!(%reason, "service reply unusable, falling back to keyword rules");
                None
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::offline()
    }
}

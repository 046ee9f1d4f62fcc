//! Adapter configuration.
//!
//! [`ServiceSettings`] is the YAML-serializable part (the `agent:` section
//! of the config file). The credential never comes from the file: it is
//! resolved once at process start and joined with the settings in
//! [`AgentConfig`].
//!
//! # Example YAML
//!
//! ```yaml
//! agent:
//!   enabled: true
//!   model: gemini-1.5-flash
//!   endpoint: https://generativelanguage.googleapis.com/v1beta
//!   timeout_secs: 15
//! ```

use serde::{Deserialize, Serialize};

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for the generative-text service.
///
/// Every field has a default, so an empty or partial `agent:` section is
/// valid.
///
/// # Examples
///
/// ```
/// use stockroom_agent::ServiceSettings;
///
/// let settings = ServiceSettings::default();
/// assert!(settings.enabled);
/// assert_eq!(settings.model, "gemini-1.5-flash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Set to `false` to always use the keyword rules.
    pub enabled: bool,
    /// Model name inserted into the `generateContent` URL.
    pub model: String,
    /// API base URL, without a trailing `/models/...` path.
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Fully resolved adapter configuration.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub service: ServiceSettings,
    pub api_key: Option<String>,
    /// Skip the service for this invocation regardless of settings.
    pub offline: bool,
}

impl AgentConfig {
    /// Combines file settings with a credential resolved by the caller.
    ///
    /// A blank credential counts as absent.
    pub fn new(service: ServiceSettings, api_key: Option<String>) -> Self {
        Self {
            service,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            offline: false,
        }
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Returns the credential when the service should be tried.
    pub fn service_key(&self) -> Option<&str> {
        if self.offline || !self.service.enabled {
            return None;
        }
        self.api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = AgentConfig::new(ServiceSettings::default(), Some("  ".to_string()));
        assert_eq!(config.service_key(), None);
    }

    #[test]
    fn test_disabled_settings_hide_key() {
        let settings = ServiceSettings {
            enabled: false,
            ..ServiceSettings::default()
        };
        let config = AgentConfig::new(settings, Some("secret".to_string()));
        assert_eq!(config.service_key(), None);
    }

    #[test]
    fn test_offline_hides_key() {
        let config =
            AgentConfig::new(ServiceSettings::default(), Some("secret".to_string())).offline(true);
        assert_eq!(config.service_key(), None);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ServiceSettings = serde_json::from_str(r#"{"timeout_secs": 3}"#).unwrap();
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.enabled);
    }
}

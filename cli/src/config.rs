//! Optional YAML configuration for the `stockroom` binary.
//!
//! # Example YAML
//!
//! ```yaml
//! agent:
//!   enabled: true
//!   model: gemini-1.5-flash
//!   timeout_secs: 10
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stockroom_agent::ServiceSettings;

use crate::error::{CliError, Result};

/// Top-level configuration file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    /// Generative-text service settings for the `agent` verb.
    pub agent: ServiceSettings,
}

impl StockroomConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ConfigRead`] if the file cannot be opened, or
    /// [`CliError::ConfigParse`] if it is not valid configuration YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

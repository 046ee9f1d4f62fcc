//! # stockroom-agent
//!
//! Natural-language front-end for the inventory commands.
//!
//! A sentence such as `"Add 20 bananas with sku B300 price 90"` becomes a
//! [`stockroom_core::Command`]. Two paths are available:
//!
//! - a generative-text service ([`GeminiClient`]) asked to answer with one
//!   JSON command object, validated by [`decode_reply`]
//! - deterministic keyword rules ([`parse_rules`]) used when the service is
//!   not configured, unreachable, or answers with something unusable
//!
//! [`Interpreter`] ties them together. Its output is an ordinary command;
//! executing it is the caller's business.
//!
//! ## Example
//!
//! ```
//! use stockroom_agent::{Interpreter, Source};
//! use stockroom_core::Command;
//!
//! let result = Interpreter::offline()
//!     .interpret("Add 20 bananas with sku B300 price 90")
//!     .unwrap();
//! assert_eq!(result.source, Source::Rules);
//! assert_eq!(
//!     result.command,
//!     Command::Add {
//!         sku: "B300".to_string(),
//!         name: "bananas".to_string(),
//!         quantity: 20,
//!         price: 90.0,
//!     }
//! );
//! ```

mod config;
mod error;
mod interpreter;
mod reply;
mod rules;
mod service;

pub use config::{
    API_KEY_ENV, AgentConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    ServiceSettings,
};
pub use error::{AgentError, ServiceError};
pub use interpreter::{Interpretation, Interpreter, Source};
pub use reply::{ServiceReply, build_prompt, decode_reply};
pub use rules::parse as parse_rules;
pub use service::{CompletionService, GeminiClient};

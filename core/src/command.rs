//! Typed command invocations.
//!
//! A [`Command`] is one fully-argued request against the store. The CLI
//! builds commands from its parsed flags; the natural-language adapter
//! builds them from free text. Both then hand the command to the same
//! dispatcher.
//!
//! The serde representation is internally tagged by `type`, which is the
//! JSON shape the generative-text service is instructed to emit:
//!
//! ```
//! use stockroom_core::Command;
//!
//! let cmd: Command = serde_json::from_str(
//!     r#"{"type":"add","sku":"B300","name":"bananas","quantity":20,"price":90}"#,
//! ).unwrap();
//! assert_eq!(cmd.sku(), Some("B300"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ItemPatch;

/// One invocation of a store-facing verb with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Add {
        sku: String,
        name: String,
        quantity: i64,
        price: f64,
    },
    Subtract {
        sku: String,
        quantity: i64,
    },
    Update {
        sku: String,
        #[serde(flatten)]
        patch: ItemPatch,
    },
    Delete {
        sku: String,
    },
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sku: Option<String>,
    },
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Add { .. } => Verb::Add,
            Self::Subtract { .. } => Verb::Subtract,
            Self::Update { .. } => Verb::Update,
            Self::Delete { .. } => Verb::Delete,
            Self::List { .. } => Verb::List,
        }
    }

    /// The SKU this command targets, if any.
    pub fn sku(&self) -> Option<&str> {
        match self {
            Self::Add { sku, .. }
            | Self::Subtract { sku, .. }
            | Self::Update { sku, .. }
            | Self::Delete { sku } => Some(sku),
            Self::List { sku } => sku.as_deref(),
        }
    }

    /// Checks that every argument the verb requires is present.
    ///
    /// Value rules (negative quantities and the like) are left to the
    /// store. This only catches shapes no store call could accept: a blank
    /// SKU, or an update that names no field to change.
    pub fn check_shape(&self) -> Result<(), String> {
        if let Some(sku) = self.sku() {
            if sku.trim().is_empty() {
                return Err(format!("{} requires a non-empty sku", self.verb()));
            }
        }
        if let Self::Update { patch, .. } = self {
            if patch.is_empty() {
                return Err("update requires at least one of name, quantity, price".to_string());
            }
        }
        Ok(())
    }
}

/// User-facing verb names accepted by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Add,
    Subtract,
    Update,
    Delete,
    List,
}

impl Verb {
    pub const ALL: [Verb; 5] = [
        Verb::Add,
        Verb::Subtract,
        Verb::Update,
        Verb::Delete,
        Verb::List,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserializes_partial_fields() {
        let cmd: Command =
            serde_json::from_str(r#"{"type":"update","sku":"A100","price":140}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Update {
                sku: "A100".to_string(),
                patch: ItemPatch::default().with_price(140.0),
            }
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<Command, _> = serde_json::from_str(r#"{"type":"restock","sku":"A1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_fractional_quantity_is_rejected() {
        let result: Result<Command, _> =
            serde_json::from_str(r#"{"type":"subtract","sku":"A1","quantity":2.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_shape_rejects_empty_update() {
        let cmd = Command::Update {
            sku: "A100".to_string(),
            patch: ItemPatch::default(),
        };
        assert!(cmd.check_shape().is_err());
    }

    #[test]
    fn test_check_shape_rejects_blank_sku() {
        let cmd = Command::Delete {
            sku: " ".to_string(),
        };
        assert!(cmd.check_shape().is_err());
    }

    #[test]
    fn test_check_shape_accepts_unfiltered_list() {
        assert!(Command::List { sku: None }.check_shape().is_ok());
    }
}

//! Core inventory types and shared validation rules.
//!
//! This crate defines the data model shared by every stockroom component:
//!
//! - [`Item`]: a single inventory record keyed by its SKU.
//! - [`ItemPatch`]: the fields supplied to a partial update.
//! - [`Command`]: one typed invocation of a user-facing verb, produced
//!   either by the CLI argument parser or by the natural-language adapter.
//! - [`FailureKind`]: the failure taxonomy and its process exit codes.
//!
//! Validation ([`validate_new_item`], [`validate_patch`],
//! [`validate_subtraction`]) is pure: it never touches storage, so the store
//! and the CSV importer apply exactly the same rules.
//!
//! # Example
//!
//! ```
//! use stockroom_core::*;
//!
//! assert!(validate_new_item("A100", "Apple", 50, 150.0).is_ok());
//! assert_eq!(
//!     validate_new_item("A100", "Apple", -1, 150.0),
//!     Err(ValidationError::NegativeQuantity { sku: "A100".into(), value: -1 })
//! );
//!
//! let remaining = validate_subtraction("A100", 5, 50).unwrap();
//! assert_eq!(remaining, 45);
//! ```

mod command;
mod failure;
mod types;
mod validate;

pub use command::{Command, Verb};
pub use failure::FailureKind;
pub use types::*;
pub use validate::{
    ValidationError, validate_name, validate_new_item, validate_patch, validate_price,
    validate_quantity, validate_sku, validate_subtraction,
};

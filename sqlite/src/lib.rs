//! SQLite storage backend for inventory items.
//!
//! This crate owns the persistent table of [`Item`](stockroom_core::Item)
//! records and enforces the item rules at its boundary: unique SKUs,
//! non-negative quantities and prices, and no silent creation on update.
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - **`schema`**: the `items` table definition and idempotent creation
//! - **`convert`**: `Item` ↔ SQL row transformations
//! - **`store`**: [`ItemStore`], the CRUD interface
//!
//! # Quick start
//!
//! ```no_run
//! use stockroom_sqlite::ItemStore;
//!
//! let store = ItemStore::open("inventory.db").unwrap();
//! store.create_item("B300", "bananas", 20, 90.0).unwrap();
//!
//! for item in store.list_items(None).unwrap() {
//!     println!("{} x{}", item.sku, item.quantity);
//! }
//! ```

mod convert;
mod error;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use schema::SchemaStatus;
pub use store::{ItemStore, Upsert};

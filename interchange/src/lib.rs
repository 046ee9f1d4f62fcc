//! CSV interchange for the item store.
//!
//! Bulk-loads items from a delimited file into an
//! [`ItemStore`](stockroom_sqlite::ItemStore) and serializes the store back
//! to the same format:
//!
//! ```text
//! sku,name,quantity,price
//! A100,Apple,50,150
//! B300,bananas,20,90.5
//! ```
//!
//! Import overwrites rows whose SKU already exists, while
//! [`ItemStore::create_item`](stockroom_sqlite::ItemStore::create_item)
//! rejects them. Both behaviors are intentional and kept separate.
//!
//! # Example
//!
//! ```
//! use stockroom_interchange::{export_to, import_from};
//! use stockroom_sqlite::ItemStore;
//!
//! let source = ItemStore::open_in_memory().unwrap();
//! source.create_item("A100", "Apple", 50, 150.0).unwrap();
//!
//! let mut buf = Vec::new();
//! export_to(&source, &mut buf).unwrap();
//! assert_eq!(String::from_utf8(buf.clone()).unwrap(), "sku,name,quantity,price\nA100,Apple,50,150\n");
//!
//! let target = ItemStore::open_in_memory().unwrap();
//! let report = import_from(&target, buf.as_slice()).unwrap();
//! assert_eq!(report.imported, 1);
//! ```

mod csv_io;
mod error;

pub use csv_io::{ImportReport, RowFailure, export_file, export_to, import_file, import_from};
pub use error::{InterchangeError, Result};

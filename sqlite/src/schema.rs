//! SQL schema for the items table.
//!
//! The store keeps a single table keyed by SKU. `CHECK` constraints repeat
//! the non-negative rules so that a row violating them can never be
//! written, even by a statement that bypassed validation.
//!
//! Insertion order is the implicit `rowid`: the table is declared with a
//! `TEXT PRIMARY KEY`, not `WITHOUT ROWID`, so every row keeps the rowid it
//! was inserted with and in-place updates never move it.

use rusqlite::Connection;

use crate::error::Result;

/// Name of the items table.
pub(crate) const ITEMS_TABLE: &str = "items";

/// `CREATE TABLE IF NOT EXISTS` statement for the items table.
///
/// Safe to execute on every startup; it never alters existing data.
pub(crate) const CREATE_ITEMS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    sku TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    price REAL NOT NULL CHECK (price >= 0),
    updated_at TEXT NOT NULL
);
"#;

/// Snapshot of the schema state, as reported by
/// [`ItemStore::status`](crate::ItemStore::status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether the items table exists.
    pub table_exists: bool,
    /// Number of stored items.
    pub item_count: usize,
}

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_ITEMS_SQL)?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
    let count: i64 = stmt.query_row([ITEMS_TABLE], |row| row.get(0))?;
    Ok(count > 0)
}

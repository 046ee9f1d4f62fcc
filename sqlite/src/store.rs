//! Item CRUD via SQLite.
//!
//! Provides [`ItemStore`], the durable mapping from SKU to [`Item`]. Every
//! mutating call runs its existence check, validation, and write inside one
//! transaction that is committed before returning, so a rejected call
//! leaves zero rows touched and an accepted one is already on disk.
//!
//! # Example
//!
//! ```
//! use stockroom_core::ItemPatch;
//! use stockroom_sqlite::ItemStore;
//!
//! let store = ItemStore::open_in_memory().unwrap();
//! store.create_item("A100", "Apple", 50, 150.0).unwrap();
//! store.subtract_quantity("A100", 5).unwrap();
//!
//! let item = store
//!     .update_item("A100", &ItemPatch::default().with_price(140.0))
//!     .unwrap();
//! assert_eq!(item.quantity, 45);
//! assert_eq!(item.price, 140.0);
//!
//! store.delete_item("A100").unwrap();
//! assert!(store.list_items(None).unwrap().is_empty());
//! ```

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use stockroom_core::{Item, ItemPatch, validate_new_item, validate_patch, validate_subtraction};
use tracing::{debug, info};

use crate::convert::{ITEM_SELECT, ItemRow, now, timestamp_to_string};
use crate::error::{Result, StoreError};
use crate::schema::{self, SchemaStatus};

/// Outcome of [`ItemStore::upsert_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Owned handle to the item table.
///
/// Constructed explicitly and passed to every operation; nothing in the
/// workspace holds a global connection. The schema is created on
/// construction, so a fresh database file is usable immediately.
pub struct ItemStore {
    conn: Connection,
}

impl ItemStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening item store");
        Self::new(Connection::open(path)?)
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection and ensures the schema exists.
    pub fn new(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Creates the items table if it is absent.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS`, so it is safe to call on every
    /// startup and never alters existing data.
    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    /// Reports whether the items table exists and how many rows it holds.
    pub fn status(&self) -> Result<SchemaStatus> {
        let table_exists = schema::table_exists(&self.conn)?;
        let item_count = if table_exists { self.count()? } else { 0 };
        Ok(SchemaStatus {
            table_exists,
            item_count,
        })
    }

    /// Number of stored items.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Inserts a new item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the SKU exists, or
    /// [`StoreError::InvalidValue`] if any field breaks an item rule.
    pub fn create_item(&self, sku: &str, name: &str, quantity: i64, price: f64) -> Result<Item> {
        let tx = self.conn.unchecked_transaction()?;

        if find_item(&tx, sku)?.is_some() {
            return Err(StoreError::DuplicateKey(sku.to_string()));
        }
        validate_new_item(sku, name, quantity, price)?;

        let item = Item {
            sku: sku.to_string(),
            name: name.to_string(),
            quantity,
            price,
            updated_at: now(),
        };
        insert_item(&tx, &item)?;
        tx.commit()?;

        info!(sku, quantity, price, "created item");
        Ok(item)
    }

    /// Loads a single item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no item has this SKU.
    pub fn get_item(&self, sku: &str) -> Result<Item> {
        find_item(&self.conn, sku)?.ok_or_else(|| StoreError::NotFound(sku.to_string()))
    }

    /// Lists items in insertion order, or the single item matching
    /// `sku_filter`.
    ///
    /// An empty store yields an empty vector. A filter that matches nothing
    /// is an error rather than an empty result.
    pub fn list_items(&self, sku_filter: Option<&str>) -> Result<Vec<Item>> {
        if let Some(sku) = sku_filter {
            return Ok(vec![self.get_item(sku)?]);
        }

        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT} ORDER BY rowid"))?;
        let rows = stmt
            .query_map([], ItemRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let items = rows
            .into_iter()
            .map(ItemRow::into_item)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = items.len(), "listed items");
        Ok(items)
    }

    /// Decrements an item's quantity by `amount` and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the SKU is missing, or
    /// [`StoreError::InvalidValue`] if `amount` is not positive or exceeds
    /// the stock on hand.
    pub fn subtract_quantity(&self, sku: &str, amount: i64) -> Result<Item> {
        let tx = self.conn.unchecked_transaction()?;

        let mut item = find_item(&tx, sku)?.ok_or_else(|| StoreError::NotFound(sku.to_string()))?;
        item.quantity = validate_subtraction(sku, amount, item.quantity)?;
        item.updated_at = now();

        tx.execute(
            "UPDATE items SET quantity = ?1, updated_at = ?2 WHERE sku = ?3",
            params![item.quantity, timestamp_to_string(&item.updated_at), sku],
        )?;
        tx.commit()?;

        info!(sku, amount, remaining = item.quantity, "subtracted quantity");
        Ok(item)
    }

    /// Applies the supplied fields of `patch` and returns the updated item.
    ///
    /// An empty patch returns the current item untouched; the SKU must
    /// still exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the SKU is missing, or
    /// [`StoreError::InvalidValue`] if a supplied field breaks an item rule.
    pub fn update_item(&self, sku: &str, patch: &ItemPatch) -> Result<Item> {
        let tx = self.conn.unchecked_transaction()?;

        let mut item = find_item(&tx, sku)?.ok_or_else(|| StoreError::NotFound(sku.to_string()))?;
        validate_patch(sku, patch)?;
        if patch.is_empty() {
            debug!(sku, "update with no fields; nothing to write");
            return Ok(item);
        }

        item.apply(patch);
        item.updated_at = now();
        write_fields(&tx, &item)?;
        tx.commit()?;

        info!(sku, ?patch, "updated item");
        Ok(item)
    }

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no item has this SKU.
    pub fn delete_item(&self, sku: &str) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM items WHERE sku = ?1", params![sku])?;

        if rows == 0 {
            return Err(StoreError::NotFound(sku.to_string()));
        }

        info!(sku, "deleted item");
        Ok(())
    }

    /// Creates the item, or overwrites every field of an existing one in
    /// place.
    ///
    /// The overwritten row keeps its insertion position. Unlike
    /// [`create_item`](Self::create_item), an existing SKU is not an error.
    pub fn upsert_item(&self, sku: &str, name: &str, quantity: i64, price: f64) -> Result<Upsert> {
        validate_new_item(sku, name, quantity, price)?;

        let tx = self.conn.unchecked_transaction()?;
        let item = Item {
            sku: sku.to_string(),
            name: name.to_string(),
            quantity,
            price,
            updated_at: now(),
        };

        let outcome = if find_item(&tx, sku)?.is_some() {
            write_fields(&tx, &item)?;
            Upsert::Updated
        } else {
            insert_item(&tx, &item)?;
            Upsert::Created
        };
        tx.commit()?;

        debug!(sku, ?outcome, "upserted item");
        Ok(outcome)
    }
}

fn find_item(conn: &Connection, sku: &str) -> Result<Option<Item>> {
    let row = conn
        .query_row(
            &format!("{ITEM_SELECT} WHERE sku = ?1"),
            params![sku],
            ItemRow::from_row,
        )
        .optional()?;
    row.map(ItemRow::into_item).transpose()
}

fn insert_item(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT INTO items (sku, name, quantity, price, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            item.sku,
            item.name,
            item.quantity,
            item.price,
            timestamp_to_string(&item.updated_at)
        ],
    )?;
    Ok(())
}

fn write_fields(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "UPDATE items SET name = ?1, quantity = ?2, price = ?3, updated_at = ?4 WHERE sku = ?5",
        params![
            item.name,
            item.quantity,
            item.price,
            timestamp_to_string(&item.updated_at),
            item.sku
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use stockroom_core::ValidationError;

    use super::*;

    fn store() -> ItemStore {
        ItemStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_then_get() {
        let store = store();
        let created = store.create_item("A100", "Apple", 50, 150.0).unwrap();
        let loaded = store.get_item("A100").unwrap();
        assert_eq!(created, loaded);
    }

    #[test]
    fn test_create_duplicate_leaves_existing_unchanged() {
        let store = store();
        store.create_item("A100", "Apple", 50, 150.0).unwrap();

        let err = store.create_item("A100", "Other", 1, 1.0).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(ref sku) if sku == "A100"));

        let item = store.get_item("A100").unwrap();
        assert_eq!(item.name, "Apple");
        assert_eq!(item.quantity, 50);
    }

    #[test]
    fn test_create_rejects_negative_quantity_without_writing() {
        let store = store();
        let err = store.create_item("A100", "Apple", -1, 1.0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidValue(ValidationError::NegativeQuantity { .. })
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        assert!(matches!(
            store().get_item("nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_subtract_past_zero_is_rejected() {
        let store = store();
        store.create_item("A100", "Apple", 5, 1.0).unwrap();
        let err = store.subtract_quantity("A100", 6).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidValue(ValidationError::InsufficientStock { .. })
        ));
        assert_eq!(store.get_item("A100").unwrap().quantity, 5);
    }

    #[test]
    fn test_subtract_missing_is_not_found() {
        assert!(matches!(
            store().subtract_quantity("A100", 1),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_empty_patch_returns_current_item() {
        let store = store();
        let created = store.create_item("A100", "Apple", 5, 1.0).unwrap();
        let same = store.update_item("A100", &ItemPatch::default()).unwrap();
        assert_eq!(created, same);
    }

    #[test]
    fn test_update_rejects_negative_price_without_writing() {
        let store = store();
        store.create_item("A100", "Apple", 5, 1.0).unwrap();
        let patch = ItemPatch::default().with_name("Pear").with_price(-2.0);
        assert!(store.update_item("A100", &patch).is_err());

        let item = store.get_item("A100").unwrap();
        assert_eq!(item.name, "Apple");
        assert_eq!(item.price, 1.0);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        assert!(matches!(
            store().delete_item("A100"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_upsert_keeps_insertion_position() {
        let store = store();
        store.create_item("A", "first", 1, 1.0).unwrap();
        store.create_item("B", "second", 2, 2.0).unwrap();

        assert_eq!(store.upsert_item("A", "renamed", 9, 9.0).unwrap(), Upsert::Updated);
        assert_eq!(store.upsert_item("C", "third", 3, 3.0).unwrap(), Upsert::Created);

        let skus: Vec<String> = store
            .list_items(None)
            .unwrap()
            .into_iter()
            .map(|item| item.sku)
            .collect();
        assert_eq!(skus, vec!["A", "B", "C"]);
        assert_eq!(store.get_item("A").unwrap().name, "renamed");
    }

    #[test]
    fn test_status_reports_count() {
        let store = store();
        store.create_item("A", "a", 1, 1.0).unwrap();
        let status = store.status().unwrap();
        assert!(status.table_exists);
        assert_eq!(status.item_count, 1);
    }
}

//! Conversion between [`Item`] and SQLite rows.
//!
//! Timestamps are stored as RFC 3339 text so the database stays readable
//! with the `sqlite3` shell.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::Row;
use stockroom_core::Item;

use crate::error::{Result, StoreError};

/// Column list shared by every `SELECT` that materializes an [`Item`].
pub(crate) const ITEM_SELECT: &str = "SELECT sku, name, quantity, price, updated_at FROM items";

/// Current time truncated to the whole second, matching stored precision.
pub(crate) fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}

pub(crate) fn timestamp_to_string(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn string_to_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::ConversionError(format!("invalid updated_at '{raw}': {e}")))
}

/// Raw column values of one items row, before timestamp parsing.
pub(crate) struct ItemRow {
    sku: String,
    name: String,
    quantity: i64,
    price: f64,
    updated_at: String,
}

impl ItemRow {
    /// Reads a row produced by [`ITEM_SELECT`].
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sku: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            price: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    pub(crate) fn into_item(self) -> Result<Item> {
        Ok(Item {
            updated_at: string_to_timestamp(&self.updated_at)?,
            sku: self.sku,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let raw = timestamp_to_string(&ts);
        assert_eq!(raw, "2026-03-14T09:26:53Z");
        assert_eq!(string_to_timestamp(&raw).unwrap(), ts);
    }

    #[test]
    fn test_invalid_timestamp_is_conversion_error() {
        assert!(matches!(
            string_to_timestamp("yesterday"),
            Err(StoreError::ConversionError(_))
        ));
    }
}

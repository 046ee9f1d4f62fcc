//! Row-by-row CSV import and export.
//!
//! The format has a fixed, mandatory header `sku,name,quantity,price`.
//! Import processes each data row independently: an existing SKU is
//! overwritten in place, and a bad row is recorded in the
//! [`ImportReport`] without stopping the rows after it. There is no
//! cross-row atomicity.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use stockroom_core::{FailureKind, ITEM_COLUMNS};
use stockroom_sqlite::{ItemStore, StoreError, Upsert};
use tracing::{debug, info, warn};

use crate::error::{InterchangeError, Result};

/// One data row that could not be imported.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based line number in the source file (the header is line 1).
    pub line: u64,
    /// SKU of the row, when it could be read.
    pub sku: Option<String>,
    pub kind: FailureKind,
    pub reason: String,
}

/// Summary of an import run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Rows written to the store (`created + updated`).
    pub imported: usize,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fields parsed from one data row.
struct ParsedRow {
    sku: String,
    name: String,
    quantity: i64,
    price: f64,
}

/// Imports every data row from `reader` into the store.
///
/// # Errors
///
/// Fails as a whole only when the header is missing or wrong, or on a
/// storage failure that is not specific to one row. Everything else is
/// reported per row in the returned [`ImportReport`].
pub fn import_from<R: Read>(store: &ItemStore, reader: R) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    check_header(rdr.headers()?)?;

    let mut report = ImportReport::default();
    for (index, result) in rdr.records().enumerate() {
        // Header is line 1; fall back to counting when the reader has no position.
        let fallback_line = index as u64 + 2;

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(fallback_line, |pos| pos.line());
                push_failure(&mut report, line, None, FailureKind::InvalidValue, err.to_string());
                continue;
            }
        };
        let line = record.position().map_or(fallback_line, |pos| pos.line());

        let row = match parse_row(&record) {
            Ok(row) => row,
            Err(reason) => {
                let sku = record.get(0).map(str::to_string);
                push_failure(&mut report, line, sku, FailureKind::InvalidValue, reason);
                continue;
            }
        };

        match store.upsert_item(&row.sku, &row.name, row.quantity, row.price) {
            Ok(Upsert::Created) => report.created += 1,
            Ok(Upsert::Updated) => report.updated += 1,
            Err(err @ (StoreError::DatabaseError(_) | StoreError::ConversionError(_))) => {
                return Err(err.into());
            }
            Err(err) => {
                push_failure(&mut report, line, Some(row.sku), err.kind(), err.to_string());
                continue;
            }
        }
        report.imported += 1;
    }

    info!(
        imported = report.imported,
        created = report.created,
        updated = report.updated,
        failed = report.failures.len(),
        "CSV import finished"
    );
    Ok(report)
}

/// Writes the header and one row per item, in listing order.
///
/// Returns the number of item rows written. An empty store produces a
/// header-only file.
pub fn export_to<W: Write>(store: &ItemStore, writer: W) -> Result<usize> {
    let items = store.list_items(None)?;
    let mut wtr = WriterBuilder::new().from_writer(writer);

    wtr.write_record(ITEM_COLUMNS)?;
    for item in &items {
        let quantity = item.quantity.to_string();
        let price = item.price.to_string();
        wtr.write_record([
            item.sku.as_str(),
            item.name.as_str(),
            quantity.as_str(),
            price.as_str(),
        ])?;
    }
    wtr.flush()?;

    info!(rows = items.len(), "CSV export finished");
    Ok(items.len())
}

/// Opens `path` and imports it with [`import_from`].
pub fn import_file(store: &ItemStore, path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    debug!(path = %path.display(), "importing CSV");
    let file = File::open(path).map_err(|source| InterchangeError::FileError {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    import_from(store, file)
}

/// Creates (or truncates) `path` and exports into it with [`export_to`].
pub fn export_file(store: &ItemStore, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    debug!(path = %path.display(), "exporting CSV");
    let file = File::create(path).map_err(|source| InterchangeError::FileError {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;
    export_to(store, file)
}

fn check_header(header: &StringRecord) -> Result<()> {
    if header.iter().eq(ITEM_COLUMNS) {
        return Ok(());
    }
    Err(InterchangeError::InvalidHeader {
        found: header.iter().collect::<Vec<_>>().join(","),
    })
}

fn parse_row(record: &StringRecord) -> std::result::Result<ParsedRow, String> {
    if record.len() != ITEM_COLUMNS.len() {
        return Err(format!(
            "expected {} fields, found {}",
            ITEM_COLUMNS.len(),
            record.len()
        ));
    }

    let sku = &record[0];
    let raw_quantity = record[2].trim();
    let quantity = raw_quantity
        .parse::<i64>()
        .map_err(|_| format!("quantity '{raw_quantity}' for sku '{sku}' is not an integer"))?;
    let raw_price = record[3].trim();
    let price = raw_price
        .parse::<f64>()
        .map_err(|_| format!("price '{raw_price}' for sku '{sku}' is not a number"))?;

    Ok(ParsedRow {
        sku: sku.to_string(),
        name: record[1].to_string(),
        quantity,
        price,
    })
}

fn push_failure(
    report: &mut ImportReport,
    line: u64,
    sku: Option<String>,
    kind: FailureKind,
    reason: String,
) {
    warn!(line, sku = sku.as_deref(), %reason, "skipping CSV row");
    report.failures.push(RowFailure {
        line,
        sku,
        kind,
        reason,
    });
}

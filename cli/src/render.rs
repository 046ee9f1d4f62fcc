//! Human-readable and JSON rendering of command outcomes.

use chrono::SecondsFormat;
use stockroom_core::{ITEM_COLUMNS, Item};
use stockroom_interchange::{ImportReport, RowFailure};

use crate::dispatch::Outcome;

/// Output format for `list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

/// Renders an outcome as the text printed on stdout.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render_outcome(outcome: &Outcome, format: ListFormat) -> serde_json::Result<String> {
    let text = match outcome {
        Outcome::Added(item) => format!(
            "Added {} ({}) qty={} price={}",
            item.sku, item.name, item.quantity, item.price
        ),
        Outcome::Subtracted(item) => format!("{} new quantity: {}", item.sku, item.quantity),
        Outcome::Updated(item) => format!(
            "Updated {}\n{}",
            item.sku,
            markdown_table(std::slice::from_ref(item))
        ),
        Outcome::Deleted(sku) => format!("Deleted {sku}"),
        Outcome::Listed(items) => match format {
            ListFormat::Json => serde_json::to_string_pretty(items)?,
            ListFormat::Table if items.is_empty() => "No items found.".to_string(),
            ListFormat::Table => markdown_table(items),
        },
    };
    Ok(text)
}

/// GitHub-flavoured markdown table, one row per item.
pub fn markdown_table(items: &[Item]) -> String {
    let mut header: Vec<&str> = ITEM_COLUMNS.to_vec();
    header.push("updated_at");

    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("|{}", "---|".repeat(header.len())));
    for item in items {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            escape_cell(&item.sku),
            escape_cell(&item.name),
            item.quantity,
            item.price,
            item.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    lines.join("\n")
}

fn escape_cell(raw: &str) -> String {
    raw.replace('|', "\\|").replace('\n', " ")
}

pub fn import_summary(report: &ImportReport) -> String {
    format!(
        "Imported {} row(s) ({} created, {} updated).",
        report.imported, report.created, report.updated
    )
}

pub fn row_failure(failure: &RowFailure) -> String {
    match &failure.sku {
        Some(sku) => format!(
            "line {}: sku '{}': [{}] {}",
            failure.line, sku, failure.kind, failure.reason
        ),
        None => format!(
            "line {}: [{}] {}",
            failure.line, failure.kind, failure.reason
        ),
    }
}

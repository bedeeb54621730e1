//! Starter spreadsheet for users without a ledger of their own.

use std::path::Path;

use ledger_core::error::Result;
use ledger_core::models::RawTable;

use crate::reader::write_csv;

/// Header row of the template: required columns plus the stock categories.
/// Categories may be renamed, removed or added freely.
pub const TEMPLATE_HEADERS: [&str; 11] = [
    "Date",
    "Day",
    "Bills",
    "Education",
    "Food",
    "Transport",
    "Shopping",
    "Other",
    "Daily Total",
    "Income",
    "Income Source",
];

/// The template as a raw table with one example row showing the day-first
/// date format.
pub fn template_table() -> RawTable {
    let example = [
        "31/01/2025",
        "Friday",
        "0",
        "0",
        "250",
        "40",
        "0",
        "0",
        "290",
        "0",
        "",
    ];
    RawTable::new(
        TEMPLATE_HEADERS.iter().map(|h| h.to_string()).collect(),
        vec![example.iter().map(|c| c.to_string()).collect()],
    )
}

/// Write the template CSV to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    write_csv(&template_table(), path)
}

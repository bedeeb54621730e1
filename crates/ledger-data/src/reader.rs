//! Delimited-file loading and writing for expense ledgers.
//!
//! Reads a CSV into a [`RawTable`] of untouched string cells. All cleaning
//! happens later in the [`normalizer`](crate::normalizer).

use std::io::{Read, Write};
use std::path::Path;

use ledger_core::error::{LedgerError, Result};
use ledger_core::models::RawTable;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the CSV file at `path` into a [`RawTable`].
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| LedgerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv_from(std::io::BufReader::new(file))?;
    debug!(
        "Read {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Read CSV data from any reader.
///
/// The first record is the header row. Ragged rows are accepted and squared
/// up to the header width; rows whose cells are all blank (a common tail of
/// spreadsheet exports) are skipped, as are records the tokenizer rejects.
pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    let mut skipped_blank = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable CSV record {}: {}", line + 1, e);
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            skipped_blank += 1;
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    if skipped_blank > 0 {
        debug!("Skipped {} blank rows", skipped_blank);
    }

    Ok(RawTable::new(headers, rows))
}

/// Write `table` as CSV to `path`, replacing any existing file.
pub fn write_csv(table: &RawTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv_to(table, file)?;
    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Write `table` as CSV to any writer.
pub fn write_csv_to<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

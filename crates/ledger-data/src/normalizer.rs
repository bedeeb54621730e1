//! Turns a [`RawTable`] into the [`CanonicalTable`] every aggregate reads.
//!
//! Steps, in order:
//! 1. trim header names and drop spreadsheet artifact columns,
//! 2. locate the required `Date`, `Day` and `Daily Total` columns,
//! 3. parse each row's day-first date, dropping rows where it fails,
//! 4. reconcile the remaining columns into spending categories and text,
//!    looking only at the rows that survived,
//! 5. read the rest of each row: trimmed weekday, numeric amounts, derived
//!    month name, missing values filled with zero.
//!
//! A row whose date cannot be parsed is dropped. Any other unreadable cell is
//! replaced by zero and reported. A non-numeric `Daily Total` rejects the
//! whole table.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use chrono::NaiveDate;
use ledger_core::calendar::{month_name, parse_day_first};
use ledger_core::error::{LedgerError, Result};
use ledger_core::models::{
    is_reserved, CanonicalTable, CategoryId, CategorySet, Column, ExpenseRecord, RawTable,
    DAILY_TOTAL, DATE, DAY, INCOME, INCOME_SOURCE, MONTH,
};
use regex::Regex;
use tracing::{debug, warn};

/// Value written into text cells that were missing in the input.
const MISSING_TEXT: &str = "0";

/// Tokens treated as a missing value in any column.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

// ── Public types ──────────────────────────────────────────────────────────────

/// What the normalizer changed or discarded on its way to a canonical table.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Data rows (1-based) removed because their date could not be parsed.
    pub dropped_rows: Vec<usize>,
    /// Artifact columns removed, as they were named in the input.
    pub dropped_columns: Vec<String>,
    /// Every cell that could not be read, as [`LedgerError::Parse`] values.
    pub issues: Vec<LedgerError>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Normalize `raw` into a canonical table.
///
/// Fails with [`LedgerError::Schema`] when `Date`, `Day` or `Daily Total` is
/// absent, or when a `Daily Total` cell is not a number.
pub fn normalize(raw: &RawTable) -> Result<CanonicalTable> {
    normalize_with_report(raw).map(|(table, _)| table)
}

/// Same as [`normalize`], also returning a [`NormalizeReport`].
pub fn normalize_with_report(raw: &RawTable) -> Result<(CanonicalTable, NormalizeReport)> {
    let mut report = NormalizeReport::default();

    // ── Step 1: headers ───────────────────────────────────────────────────────
    let headers = clean_headers(&raw.headers);
    let mut kept: Vec<usize> = Vec::with_capacity(headers.len());
    for (i, name) in headers.iter().enumerate() {
        if is_artifact_column(name) {
            debug!("Dropping artifact column {:?}", raw.headers[i]);
            report.dropped_columns.push(raw.headers[i].clone());
        } else {
            kept.push(i);
        }
    }

    // ── Step 2: required columns ──────────────────────────────────────────────
    let find = |name: &str| kept.iter().copied().find(|&i| headers[i] == name);
    let date_idx = find(DATE).ok_or_else(|| missing_column(DATE))?;
    let day_idx = find(DAY).ok_or_else(|| missing_column(DAY))?;
    let total_idx = find(DAILY_TOTAL).ok_or_else(|| missing_column(DAILY_TOTAL))?;
    let income_idx = find(INCOME);
    if income_idx.is_none() {
        warn!("No {} column found; income is treated as zero", INCOME);
    }

    // ── Step 3: dates ─────────────────────────────────────────────────────────
    let mut dated: Vec<(usize, NaiveDate, &[String])> = Vec::with_capacity(raw.rows.len());
    for (n, row) in raw.rows.iter().enumerate() {
        let row_no = n + 1;
        match cell_value(&row[date_idx]).and_then(parse_day_first) {
            Some(date) => dated.push((row_no, date, row.as_slice())),
            None => {
                warn!("Dropping row {}: unreadable date {:?}", row_no, row[date_idx]);
                report.dropped_rows.push(row_no);
                report.issues.push(LedgerError::Parse {
                    column: DATE.to_string(),
                    row: row_no,
                    value: row[date_idx].clone(),
                    expected: "a day-first date",
                });
            }
        }
    }

    // ── Step 4: schema reconciliation ─────────────────────────────────────────
    let kept_rows: Vec<&[String]> = dated.iter().map(|(_, _, row)| *row).collect();
    let schema = reconcile_columns(&kept_rows, &headers, &kept);

    // ── Step 5: rows ──────────────────────────────────────────────────────────
    let mut records = Vec::with_capacity(dated.len());
    for (row_no, date, row) in dated {
        let daily_total = match read_amount(&row[total_idx]) {
            Ok(v) => v.unwrap_or(0.0),
            Err(()) => {
                return Err(LedgerError::Schema(format!(
                    "column `{}` row {}: cannot coerce {:?} to a number",
                    DAILY_TOTAL, row_no, row[total_idx]
                )));
            }
        };

        let income = match income_idx {
            Some(idx) => numeric_or_zero(&row[idx], INCOME, row_no, &mut report),
            None => 0.0,
        };

        let categories = schema
            .category_columns
            .iter()
            .zip(schema.categories.names())
            .map(|(&idx, name)| numeric_or_zero(&row[idx], name, row_no, &mut report))
            .collect();

        let text = schema
            .text_indices
            .iter()
            .map(|&idx| match cell_value(&row[idx]) {
                Some(v) => v.to_string(),
                None => MISSING_TEXT.to_string(),
            })
            .collect();

        let day = match cell_value(&row[day_idx]) {
            Some(v) => v.trim().to_string(),
            None => MISSING_TEXT.to_string(),
        };

        records.push(ExpenseRecord {
            date,
            day,
            month: month_name(date).to_string(),
            daily_total,
            income,
            categories,
            text,
        });
    }

    debug!(
        "Normalized {} of {} rows; {} categories: {:?}",
        records.len(),
        raw.rows.len(),
        schema.categories.len(),
        schema.categories.names()
    );

    let table = CanonicalTable {
        layout: schema.layout,
        categories: schema.categories,
        text_columns: schema.text_columns,
        records,
    };
    Ok((table, report))
}

/// Parse a money amount.
///
/// Whitespace, thousands separators and `₹`/`$` symbols are ignored and an
/// amount in parentheses is negative. Returns `Ok(None)` for a missing value
/// and `Err(())` when the cell holds something other than a number.
///
/// # Examples
///
/// ```
/// use ledger_data::normalizer::read_amount;
///
/// assert_eq!(read_amount(" ₹1,250.50 "), Ok(Some(1250.5)));
/// assert_eq!(read_amount("(40)"), Ok(Some(-40.0)));
/// assert_eq!(read_amount(""), Ok(None));
/// assert_eq!(read_amount("lunch"), Err(()));
/// ```
#[allow(clippy::result_unit_err)]
pub fn read_amount(raw: &str) -> std::result::Result<Option<f64>, ()> {
    let Some(s) = cell_value(raw) else {
        return Ok(None);
    };
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '$') && !c.is_whitespace())
        .collect();

    let (negative, body) = match cleaned
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, cleaned.as_str()),
    };

    match body.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(if negative { -v } else { v })),
        _ => Err(()),
    }
}

// ── Schema reconciliation ─────────────────────────────────────────────────────

/// Result of classifying the kept columns.
struct Schema {
    layout: Vec<Column>,
    categories: CategorySet,
    /// Raw column index of each category, aligned with `categories`.
    category_columns: Vec<usize>,
    text_columns: Vec<String>,
    /// Raw column index of each text column, aligned with `text_columns`.
    text_indices: Vec<usize>,
}

/// Classify every kept column over `rows`. Reserved columns map to their fixed
/// meaning (an input `Month` column is ignored since it is re-derived);
/// `Income Source` is text; any other column is a spending category when
/// every non-missing cell is a number, otherwise free text.
fn reconcile_columns(rows: &[&[String]], headers: &[String], kept: &[usize]) -> Schema {
    let mut layout = Vec::with_capacity(kept.len());
    let mut category_names = Vec::new();
    let mut category_columns = Vec::new();
    let mut text_columns = Vec::new();
    let mut text_indices = Vec::new();

    // Header names are unique here; see `clean_headers`.
    for &idx in kept {
        let name = headers[idx].as_str();
        if is_reserved(name) && name != INCOME_SOURCE {
            match name {
                DATE => layout.push(Column::Date),
                DAY => layout.push(Column::Day),
                DAILY_TOTAL => layout.push(Column::DailyTotal),
                INCOME => layout.push(Column::Income),
                _ => debug!("Ignoring input {} column; it is derived from {}", MONTH, DATE),
            }
            continue;
        }

        if name != INCOME_SOURCE && is_numeric_column(rows, idx) {
            layout.push(Column::Category(CategoryId(category_names.len())));
            category_names.push(name.to_string());
            category_columns.push(idx);
        } else {
            layout.push(Column::Text(text_columns.len()));
            text_columns.push(name.to_string());
            text_indices.push(idx);
        }
    }

    Schema {
        layout,
        categories: CategorySet::new(category_names),
        category_columns,
        text_columns,
        text_indices,
    }
}

/// `true` when every non-missing cell in column `idx` reads as an amount.
fn is_numeric_column(rows: &[&[String]], idx: usize) -> bool {
    rows.iter().all(|row| read_amount(&row[idx]).is_ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trim header names and disambiguate duplicates as `name.1`, `name.2`, …
///
/// A suffix is skipped when another header already carries that name, so
/// `Food, Food, Food.1` becomes `Food, Food.2, Food.1`.
fn clean_headers(headers: &[String]) -> Vec<String> {
    let trimmed: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let mut taken: HashSet<String> = trimmed.iter().filter(|h| !h.is_empty()).cloned().collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();

    trimmed
        .iter()
        .map(|name| {
            if name.is_empty() || seen.insert(name.as_str()) {
                return name.clone();
            }
            let suffix = next_suffix.entry(name.as_str()).or_insert(1);
            loop {
                let candidate = format!("{}.{}", name, suffix);
                *suffix += 1;
                if taken.insert(candidate.clone()) {
                    return candidate;
                }
            }
        })
        .collect()
}

/// Empty headers and spreadsheet-export `Unnamed: 11` index columns.
fn is_artifact_column(name: &str) -> bool {
    static UNNAMED: OnceLock<Regex> = OnceLock::new();
    let re = UNNAMED.get_or_init(|| Regex::new(r"^Unnamed: \d+$").expect("regex is valid"));
    name.is_empty() || re.is_match(name)
}

/// The trimmed cell, or `None` when it is blank or an NA marker.
fn cell_value(raw: &str) -> Option<&str> {
    let s = raw.trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s)
    }
}

/// Read a numeric cell, substituting zero (and recording the issue) when it
/// cannot be parsed.
fn numeric_or_zero(raw: &str, column: &str, row: usize, report: &mut NormalizeReport) -> f64 {
    match read_amount(raw) {
        Ok(v) => v.unwrap_or(0.0),
        Err(()) => {
            warn!(
                "Row {}: {:?} in column {} is not a number; using 0",
                row, raw, column
            );
            report.issues.push(LedgerError::Parse {
                column: column.to_string(),
                row,
                value: raw.to_string(),
                expected: "a number",
            });
            0.0
        }
    }
}

fn missing_column(name: &str) -> LedgerError {
    LedgerError::Schema(format!("missing required column `{}`", name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

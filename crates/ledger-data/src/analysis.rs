//! One-shot pipeline: read a ledger file, normalize it, compute the dashboard.
//!
//! [`load_ledger`] and [`analyze`] are split so a caller holding a loaded
//! ledger can recompute views for a new selection without touching the disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use ledger_core::error::Result;
use ledger_core::models::{CanonicalTable, FilterSelection};
use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, DashboardResults};
use crate::normalizer::{normalize_with_report, NormalizeReport};
use crate::reader::read_csv;

// ── Public types ──────────────────────────────────────────────────────────────

/// A normalized ledger together with where it came from.
#[derive(Debug)]
pub struct LoadedLedger {
    pub source: PathBuf,
    pub table: CanonicalTable,
    pub report: NormalizeReport,
    /// Data rows in the file before normalization.
    pub rows_read: usize,
    /// Wall-clock seconds spent reading and normalizing.
    pub load_time_seconds: f64,
}

/// Metadata produced alongside the dashboard results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Ledger file the results were computed from.
    pub source: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows removed because their date could not be parsed.
    pub rows_dropped: usize,
    /// Cells that could not be read, dropped dates included.
    pub cells_substituted: usize,
    pub categories: Vec<String>,
    pub load_time_seconds: f64,
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub metadata: AnalysisMetadata,
    pub results: DashboardResults,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Read and normalize the ledger at `path`.
///
/// Fails on unreadable files and schema errors. Cell-level problems are kept
/// in the returned [`NormalizeReport`].
pub fn load_ledger(path: &Path) -> Result<LoadedLedger> {
    let start = Instant::now();
    let raw = read_csv(path)?;
    let (table, report) = normalize_with_report(&raw)?;
    let load_time_seconds = start.elapsed().as_secs_f64();

    if !report.dropped_rows.is_empty() {
        warn!(
            "Dropped {} rows with unreadable dates from {}",
            report.dropped_rows.len(),
            path.display()
        );
    }
    info!(
        "Loaded {} rows ({} categories) from {}",
        table.len(),
        table.categories.len(),
        path.display()
    );

    Ok(LoadedLedger {
        source: path.to_path_buf(),
        rows_read: raw.len(),
        table,
        report,
        load_time_seconds,
    })
}

/// Compute every dashboard view of `ledger` for `selection`.
pub fn analyze(ledger: &LoadedLedger, selection: &FilterSelection) -> Result<Analysis> {
    let start = Instant::now();
    let results = Aggregator::compute(&ledger.table, selection)?;
    let aggregate_time_seconds = start.elapsed().as_secs_f64();
    debug!("Aggregated in {:.4}s", aggregate_time_seconds);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: ledger.source.clone(),
        rows_read: ledger.rows_read,
        rows_kept: ledger.table.len(),
        rows_dropped: ledger.report.dropped_rows.len(),
        cells_substituted: ledger.report.issues.len(),
        categories: ledger.table.categories.names().to_vec(),
        load_time_seconds: ledger.load_time_seconds,
        aggregate_time_seconds,
    };

    Ok(Analysis { metadata, results })
}

/// [`load_ledger`] followed by [`analyze`].
pub fn analyze_file(path: &Path, selection: &FilterSelection) -> Result<Analysis> {
    let ledger = load_ledger(path)?;
    analyze(&ledger, selection)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::error::LedgerError;
    use std::fs;
    use tempfile::TempDir;

    const LEDGER: &str = "\
Date,Day,Bills,Food,Daily Total,Income,Income Source,Unnamed: 7
01/01/2024,Monday,500,100,600,5000,Salary,
15/01/2024,Monday,300,100,400,0,,
not a date,Tuesday,1,1,2,0,,
05/02/2024,Monday,1000,500,1500,5000,Salary,
04/03/2024,Monday,900,300,1200,5000,Salary,
";

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_ledger_reports_dropped_rows() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ledger.csv", LEDGER);

        let ledger = load_ledger(&path).unwrap();
        assert_eq!(ledger.source, path);
        assert_eq!(ledger.rows_read, 5);
        assert_eq!(ledger.table.len(), 4);
        assert_eq!(ledger.report.dropped_rows, vec![3]);
        assert_eq!(ledger.report.dropped_columns, vec!["Unnamed: 7"]);
    }

    #[test]
    fn test_analyze_full_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ledger.csv", LEDGER);

        let analysis = analyze_file(&path, &FilterSelection::default()).unwrap();
        assert_eq!(analysis.metadata.rows_kept, 4);
        assert_eq!(analysis.metadata.rows_dropped, 1);
        assert_eq!(analysis.metadata.categories, vec!["Bills", "Food"]);

        let series = &analysis.results.month_over_month;
        assert_eq!(series.len(), 2);
        assert!((series[0].percent_change.unwrap() - 50.0).abs() < 1e-9);
        assert!((series[1].percent_change.unwrap() + 20.0).abs() < 1e-9);

        let rec = analysis.results.recommendation.as_ref().unwrap();
        assert_eq!(rec.limit, 1200.0);
        assert_eq!(rec.period.label(), "April 2024");
    }

    #[test]
    fn test_analyze_reuses_loaded_ledger() {
        let dir = TempDir::new().unwrap();
        let ledger = load_ledger(&write(&dir, "ledger.csv", LEDGER)).unwrap();

        let food = FilterSelection::from_labels("January", "All", "Food");
        let analysis = analyze(&ledger, &food).unwrap();
        let summary = analysis.results.summary.unwrap();
        assert_eq!(summary.total_spending, 200.0);
        assert_eq!(summary.total_income, 5000.0);
    }

    #[test]
    fn test_schema_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "Date,Food,Daily Total\n01/01/2024,1,1\n");
        let err = load_ledger(&path).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_missing_file_surfaces() {
        let dir = TempDir::new().unwrap();
        let err = load_ledger(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LedgerError::FileRead { .. }));
    }

    #[test]
    fn test_metadata_serializes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ledger.csv", LEDGER);
        let analysis = analyze_file(&path, &FilterSelection::default()).unwrap();

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["metadata"]["rows_kept"], 4);
        assert_eq!(json["results"]["filtered"][0]["date"], "2024-01-01");
        assert_eq!(json["results"]["options"]["months"][1], "January");
    }
}

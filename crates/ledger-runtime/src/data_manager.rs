//! Holder of the one active ledger.
//!
//! Each [`LedgerManager::load`] re-reads and re-normalizes the whole file. A
//! successful load replaces the active ledger; a failed one leaves the
//! last-known-good ledger in place and records the error.

use std::path::Path;

use ledger_core::error::{LedgerError, Result};
use ledger_core::models::FilterSelection;
use ledger_data::analysis::{analyze, load_ledger, Analysis, LoadedLedger};

// ── LedgerManager ─────────────────────────────────────────────────────────────

/// Owns the active [`LoadedLedger`] and runs analysis passes over it.
///
/// # Example
/// ```no_run
/// use ledger_runtime::data_manager::LedgerManager;
/// use ledger_runtime::core::models::FilterSelection;
///
/// let mut mgr = LedgerManager::new();
/// if mgr.load("Finance_data.csv".as_ref()).is_some() {
///     let analysis = mgr.analyze(&FilterSelection::default()).unwrap();
///     println!("{} rows", analysis.metadata.rows_kept);
/// }
/// ```
#[derive(Debug, Default)]
pub struct LedgerManager {
    /// Most recently loaded ledger that passed normalization.
    active: Option<LoadedLedger>,
    /// Human-readable description of the last load error.
    last_error: Option<String>,
    /// `true` when `last_error` came from a schema problem.
    last_error_is_schema: bool,
}

impl LedgerManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Load the ledger at `path` and make it active.
    ///
    /// On failure the previous ledger stays active and is returned, or `None`
    /// when nothing has loaded yet. The error is kept in [`last_error`].
    ///
    /// [`last_error`]: LedgerManager::last_error
    pub fn load(&mut self, path: &Path) -> Option<&LoadedLedger> {
        match load_ledger(path) {
            Ok(ledger) => {
                tracing::debug!(
                    rows = ledger.table.len(),
                    categories = ledger.table.categories.len(),
                    "active ledger replaced"
                );
                self.active = Some(ledger);
                self.last_error = None;
                self.last_error_is_schema = false;
            }
            Err(e) => {
                match &self.active {
                    Some(current) => tracing::warn!(
                        error = %e,
                        keeping = %current.source.display(),
                        "load failed; keeping last-known-good ledger"
                    ),
                    None => tracing::warn!(error = %e, "load failed; no ledger loaded"),
                }
                self.last_error_is_schema = e.is_schema();
                self.last_error = Some(e.to_string());
            }
        }
        self.active.as_ref()
    }

    /// Compute the dashboard for `selection` over the active ledger.
    pub fn analyze(&self, selection: &FilterSelection) -> Result<Analysis> {
        let ledger = self
            .active
            .as_ref()
            .ok_or_else(|| LedgerError::Config("no ledger loaded".to_string()))?;
        analyze(ledger, selection)
    }

    pub fn active(&self) -> Option<&LoadedLedger> {
        self.active.as_ref()
    }

    pub fn has_ledger(&self) -> bool {
        self.active.is_some()
    }

    /// Description of the last load error, cleared by the next good load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `true` when the last load was rejected for its schema.
    pub fn last_error_is_schema(&self) -> bool {
        self.last_error.is_some() && self.last_error_is_schema
    }

    /// Drop the active ledger.
    pub fn clear(&mut self) {
        self.active = None;
        tracing::debug!("active ledger cleared");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

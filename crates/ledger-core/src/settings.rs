use clap::Parser;
use std::path::PathBuf;

use crate::models::{FilterSelection, ALL, ALL_CATEGORIES};

/// File name of the bundled default ledger.
pub const DEFAULT_DATA_FILE: &str = "Finance_data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Spending metrics and chart tables for a personal expense ledger
#[derive(Parser, Debug, Clone)]
#[command(
    name = "expense-dashboard",
    about = "Spending metrics and chart tables for a personal expense ledger",
    version
)]
pub struct Settings {
    /// Expense CSV to analyse (falls back to the default ledger)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Ledger used when no file is given or the given file is rejected
    #[arg(long, env = "EXPENSE_DEFAULT_FILE", default_value = DEFAULT_DATA_FILE)]
    pub default_file: PathBuf,

    /// Month to show, e.g. "January"
    #[arg(long, default_value = ALL)]
    pub month: String,

    /// Weekday to show within the selected month, e.g. "Monday"
    #[arg(long, default_value = ALL)]
    pub day: String,

    /// Category column to read instead of "Daily Total"
    #[arg(long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Currency symbol for rendered amounts
    #[arg(long, default_value = "₹")]
    pub currency: String,

    /// Write an empty expense template CSV to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_template: Option<PathBuf>,

    /// Also write the normalized ledger as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub export_normalized: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The filter triple requested on the command line.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection::from_labels(&self.month, &self.day, &self.category)
    }

    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

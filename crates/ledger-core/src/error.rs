use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Signal that an aggregate was requested over zero rows.
///
/// Carried per view so the presentation layer can render a "no data" state
/// instead of a NaN or a misleading zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No rows available for {view}")]
pub struct EmptyResult {
    /// Name of the view that had nothing to aggregate.
    pub view: &'static str,
}

impl EmptyResult {
    pub fn new(view: &'static str) -> Self {
        Self { view }
    }
}

/// Serialises as `{"status": "empty", "view": ...}`.
impl Serialize for EmptyResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EmptyResult", 2)?;
        state.serialize_field("status", "empty")?;
        state.serialize_field("view", self.view)?;
        state.end()
    }
}

/// Outcome of a single aggregate view.
pub type Aggregate<T> = std::result::Result<T, EmptyResult>;

/// `serialize_with` helper writing an [`Aggregate`] untagged: the value itself
/// when present, the [`EmptyResult`] object otherwise.
pub fn serialize_aggregate<T, S>(
    aggregate: &Aggregate<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match aggregate {
        Ok(value) => value.serialize(serializer),
        Err(empty) => empty.serialize(serializer),
    }
}

/// All errors produced by the expense dashboard.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited input could not be tokenised.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing or unusable; fatal for the current load.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A single cell could not be coerced to its expected type.
    #[error("Cannot read {value:?} in column {column} (row {row}) as {expected}")]
    Parse {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// An aggregate was requested over zero rows.
    #[error(transparent)]
    Empty(#[from] EmptyResult),

    /// The filter selection names a category that was not discovered.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Results could not be rendered as JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// `true` for errors that reject the whole input file rather than a cell.
    pub fn is_schema(&self) -> bool {
        matches!(self, LedgerError::Schema(_))
    }
}

/// Convenience alias used throughout the ledger crates.
pub type Result<T> = std::result::Result<T, LedgerError>;

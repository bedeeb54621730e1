//! Core types shared by the expense dashboard crates.
//!
//! Holds the ledger data model, the error type, calendar and statistics
//! helpers, number formatting and the command-line settings.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod ordering;
pub mod settings;
pub mod stats;

pub use error::{serialize_aggregate, Aggregate, EmptyResult, LedgerError, Result};

//! Data layer for the expense dashboard.
//!
//! Reads delimited ledger files, normalizes them into a canonical table,
//! computes the dashboard views and runs the one-shot analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod normalizer;
pub mod reader;
pub mod template;

pub use ledger_core as core;

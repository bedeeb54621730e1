//! Runtime layer for the expense dashboard.
//!
//! Holds the single active ledger and decides what happens when a new load
//! fails.

pub mod data_manager;

pub use ledger_core as core;
pub use ledger_data as data;

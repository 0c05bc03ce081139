#![forbid(unsafe_code)]

//! Core domain model and booking logic for the studio ledger.
//!
//! This crate provides:
//! - Domain types (clients, staff, equipment, sessions)
//! - The in-memory ledger and its booking rules
//! - Session cost computation
//! - Snapshots and their JSON file store
//! - Reports and sample data

pub mod types;
pub mod error;
pub mod pricing;
pub mod ledger;
pub mod snapshot;
pub mod store;
pub mod report;
pub mod seed;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use ledger::{BookingPolicy, Ledger};
pub use snapshot::{LedgerSnapshot, NextIds};
pub use store::SnapshotStore;
pub use report::{revenue_summary, write_sessions_csv, RevenueSummary};
pub use seed::seed_sample_data;
pub use config::Config;
pub use pricing::session_cost;

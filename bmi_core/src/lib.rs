#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - Domain types (categories, pending measurements, saved records)
//! - The BMI engine (computation and classification)
//! - Persistence (SQLite-backed measurement store)
//! - The tracker facade used by presentation layers
//! - History table rendering

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod store;
pub mod tracker;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{classify, cm_to_m, compute};
pub use store::{MeasurementStore, SqliteStore};
pub use tracker::Tracker;
pub use history::render_table;

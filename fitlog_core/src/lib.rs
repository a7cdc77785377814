#![forbid(unsafe_code)]

//! Core logic for the fitlog fitness tracker.
//!
//! This crate provides:
//! - Record types (workouts, cardio, nutrition, bodyweight)
//! - Entry building and input validation
//! - The in-memory table and recent-history lookup
//! - CSV persistence
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod builder;
pub mod table;
pub mod history;
pub mod storage;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use table::Table;
pub use history::{recent_entries, DEFAULT_HISTORY_LIMIT};
pub use storage::{CsvStore, RecordStore};
pub use config::Config;

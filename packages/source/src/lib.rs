#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sighting record loading.
//!
//! Reads the delimited record file, resolves the configured
//! [`FieldMapping`](ufo_map_sighting_models::FieldMapping) against its
//! header row once, keeps the rows for the target state, and normalizes
//! each into a [`SightingRecord`](ufo_map_sighting_models::SightingRecord).

pub mod loader;
pub mod parsing;
pub mod progress;

use ufo_map_sighting_models::FieldRole;

/// Errors that can occur while loading sighting records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A mapped column is not present in the header row.
    #[error("Column '{column}' for field '{role}' not found in header row")]
    MissingColumn {
        /// Role the column was mapped for.
        role: FieldRole,
        /// Configured column name.
        column: String,
    },

    /// A row has no value for a required coordinate.
    #[error("Line {line}: missing {role}")]
    MissingCoordinate {
        /// 1-based line number in the record file.
        line: u64,
        /// Which coordinate was missing.
        role: FieldRole,
    },

    /// A row has a coordinate that is not a finite number.
    #[error("Line {line}: invalid {role} '{value}'")]
    InvalidCoordinate {
        /// 1-based line number in the record file.
        line: u64,
        /// Which coordinate was invalid.
        role: FieldRole,
        /// The raw cell text.
        value: String,
    },
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Summary statistics over sighting records.
//!
//! Computes the dashboard's counts, rankings and year/month analysis. The
//! computation never fails: fields that cannot be derived degrade to
//! unknown with a reason instead.

pub mod ranking;
pub mod summary;

pub use summary::compute_summary;

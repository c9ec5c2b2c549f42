#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics summary types for the sighting dashboard.
//!
//! A [`StatisticsSummary`] is computed once from the full record set and
//! only read afterwards, by the dashboard panel and the console summary.

use serde::{Deserialize, Serialize};
use ufo_map_sighting_models::Resolved;

/// Number of entries kept in every ranked list.
pub const TOP_N: usize = 5;

/// Occurrence count of a single label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCount<T = String> {
    /// The counted value (shape, city, year, ...).
    pub label: T,
    /// Number of records carrying the value.
    pub count: u64,
}

/// Aggregate statistics over a set of sightings.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    /// Total number of sightings.
    pub total_sightings: u64,
    /// Number of distinct city values.
    pub unique_cities: u64,
    /// Number of distinct shape values.
    pub unique_shapes: u64,
    /// Most frequently reported shape.
    pub most_common_shape: Resolved<String>,
    /// Year with the most sightings.
    pub peak_year: Resolved<i32>,
    /// Name of the month with the most sightings.
    pub peak_month: Resolved<&'static str>,
    /// Earliest numeric year.
    pub earliest_year: Resolved<i32>,
    /// Latest numeric year.
    pub latest_year: Resolved<i32>,
    /// Up to [`TOP_N`] shapes, most frequent first.
    pub top_shapes: Vec<RankedCount>,
    /// Up to [`TOP_N`] cities, most frequent first.
    pub top_cities: Vec<RankedCount>,
    /// Up to [`TOP_N`] numeric year values, most frequent first. Fractional
    /// years keep their own entry.
    pub year_counts: Vec<RankedCount<f64>>,
}

impl StatisticsSummary {
    /// `"earliest - latest"`, or unknown when no year could be read.
    #[must_use]
    pub fn year_range(&self) -> Resolved<String> {
        match (&self.earliest_year, &self.latest_year) {
            (Resolved::Known(earliest), Resolved::Known(latest)) => {
                Resolved::Known(format!("{earliest} - {latest}"))
            }
            (Resolved::Unknown(reason), _) | (_, Resolved::Unknown(reason)) => {
                Resolved::Unknown(*reason)
            }
        }
    }
}

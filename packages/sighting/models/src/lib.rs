#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sighting record types shared across the ufo-map toolchain.
//!
//! Defines the normalized [`SightingRecord`] produced by the record loader,
//! the [`FieldMapping`] that ties semantic roles to source columns, and the
//! [`Resolved`] value type used wherever a derived field may degrade to the
//! `"Unknown"` sentinel. The [`coerce`] module holds the helpers that turn
//! raw text into [`Resolved`] values.

pub mod coerce;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel text shown for any value that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Literal text a missing shape or city is normalized to.
pub const RAW_MISSING: &str = "nan";

/// Placeholder used when a sighting has no description.
pub const NO_DESCRIPTION: &str = "No description";

/// A single reported sighting, normalized from one row of the record file.
///
/// `year`, `month` and `day` are kept as raw text: an absent value is the
/// empty string, never a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingRecord {
    /// Reported object shape (`"nan"` when the source cell was empty).
    pub shape: String,
    /// Free-text description excerpt.
    pub description: String,
    /// City the sighting was reported in (`"nan"` when empty).
    pub city: String,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Year sighted, raw text.
    pub year: String,
    /// Month sighted, raw text.
    pub month: String,
    /// Day sighted, raw text.
    pub day: String,
}

/// Why a derived value fell back to [`UNKNOWN`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnknownReason {
    /// The input value was absent or empty.
    Missing,
    /// The input value could not be read as a number.
    NotNumeric,
    /// The input value was numeric but outside the accepted range.
    OutOfRange,
    /// Nothing was left to derive a value from after filtering.
    NoData,
}

/// A value that is either known or degraded to the [`UNKNOWN`] sentinel
/// together with the reason it degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    /// The value was determined.
    Known(T),
    /// The value could not be determined.
    Unknown(UnknownReason),
}

impl<T> Resolved<T> {
    /// Wraps an optional value, using `reason` when it is `None`.
    #[must_use]
    pub fn from_option(value: Option<T>, reason: UnknownReason) -> Self {
        value.map_or(Self::Unknown(reason), Self::Known)
    }

    /// Returns the known value, if any.
    #[must_use]
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown(_) => None,
        }
    }

    /// Returns the reason the value is unknown, if it is.
    #[must_use]
    pub const fn reason(&self) -> Option<UnknownReason> {
        match self {
            Self::Known(_) => None,
            Self::Unknown(reason) => Some(*reason),
        }
    }

    /// Returns `true` when the value was determined.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Maps the known value, preserving the unknown reason.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        match self {
            Self::Known(value) => Resolved::Known(f(value)),
            Self::Unknown(reason) => Resolved::Unknown(reason),
        }
    }

    /// Chains another fallible step onto a known value.
    #[must_use]
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Resolved<U>) -> Resolved<U> {
        match self {
            Self::Known(value) => f(value),
            Self::Unknown(reason) => Resolved::Unknown(reason),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unknown(_) => f.write_str(UNKNOWN),
        }
    }
}

/// Semantic role of a column in the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldRole {
    /// Object shape.
    Shape,
    /// Description excerpt.
    Description,
    /// City name.
    City,
    /// Latitude.
    Latitude,
    /// Longitude.
    Longitude,
    /// Year sighted.
    Year,
    /// Month sighted.
    Month,
    /// Day sighted.
    Day,
    /// State/region code used to select rows.
    State,
}

/// Column names for each [`FieldRole`] in the record file.
///
/// Names are matched against the header row after trimming surrounding
/// whitespace on both sides, so `"Location.Coordinates.Latitude "` and
/// `"Location.Coordinates.Latitude"` refer to the same column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Column holding the object shape.
    pub shape: String,
    /// Column holding the description excerpt.
    pub description: String,
    /// Column holding the city name.
    pub city: String,
    /// Column holding the latitude.
    pub latitude: String,
    /// Column holding the longitude.
    pub longitude: String,
    /// Column holding the year sighted.
    pub year: String,
    /// Column holding the month sighted.
    pub month: String,
    /// Column holding the day sighted.
    pub day: String,
    /// Column holding the state/region code.
    pub state: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            shape: "Data.Shape".to_string(),
            description: "Data.Description excerpt".to_string(),
            city: "Location.City".to_string(),
            latitude: "Location.Coordinates.Latitude".to_string(),
            longitude: "Location.Coordinates.Longitude".to_string(),
            year: "Dates.Sighted.Year".to_string(),
            month: "Dates.Sighted.Month".to_string(),
            day: "Date.Sighted.Day".to_string(),
            state: "Location.State".to_string(),
        }
    }
}

impl FieldMapping {
    /// Every role paired with its configured column name.
    #[must_use]
    pub fn columns(&self) -> [(FieldRole, &str); 9] {
        [
            (FieldRole::Shape, self.shape.as_str()),
            (FieldRole::Description, self.description.as_str()),
            (FieldRole::City, self.city.as_str()),
            (FieldRole::Latitude, self.latitude.as_str()),
            (FieldRole::Longitude, self.longitude.as_str()),
            (FieldRole::Year, self.year.as_str()),
            (FieldRole::Month, self.month.as_str()),
            (FieldRole::Day, self.day.as_str()),
            (FieldRole::State, self.state.as_str()),
        ]
    }
}

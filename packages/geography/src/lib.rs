#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary document parsing and region centroid extraction.
//!
//! Reads a `GeoJSON` `FeatureCollection` of named city polygons and reduces
//! each `Polygon`/`MultiPolygon` feature to a single label anchor. Other
//! geometry types are skipped; malformed coordinates fail the whole load.

pub mod boundaries;
pub mod centroid;

use thiserror::Error;

/// Errors that can occur while reading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Boundary document is a {found}, expected a FeatureCollection")]
    NotFeatureCollection {
        /// The top-level object type found instead.
        found: &'static str,
    },

    /// A feature has no geometry.
    #[error("Feature {feature} has no geometry")]
    MissingGeometry {
        /// Index of the feature in the collection.
        feature: usize,
    },

    /// A feature's coordinates cannot be reduced to a centroid.
    #[error("Feature {feature} has malformed geometry: {message}")]
    MalformedGeometry {
        /// Index of the feature in the collection.
        feature: usize,
        /// Description of what went wrong.
        message: String,
    },
}

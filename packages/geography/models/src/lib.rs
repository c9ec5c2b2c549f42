#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary region types.
//!
//! A [`BoundaryRegion`] is one named polygon feature of the boundary
//! document reduced to a single [`Centroid`] for label placement. The
//! polygon itself stays in the source document and is referenced by
//! feature index.

use serde::{Deserialize, Serialize};
use ufo_map_sighting_models::Resolved;

/// A representative point for a region, used as a label anchor.
///
/// This is the unweighted mean of one ring's vertices, not an
/// area-weighted centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    /// Latitude (mean of the ring's y ordinates).
    pub lat: f64,
    /// Longitude (mean of the ring's x ordinates).
    pub lon: f64,
}

/// Geometry type a region was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolygonKind {
    /// A single polygon; the exterior ring was used.
    Polygon,
    /// A multi-part polygon; the exterior ring of the first part was used.
    MultiPolygon,
}

/// One named region of the boundary document.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRegion {
    /// Position of the feature in the source document.
    pub feature_index: usize,
    /// Region name, or unknown when the name property is absent.
    pub name: Resolved<String>,
    /// Geometry type of the source feature.
    pub kind: PolygonKind,
    /// Label anchor.
    pub centroid: Centroid,
}

impl BoundaryRegion {
    /// Region name as displayed, with the `"Unknown"` sentinel for a
    /// missing name.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.to_string()
    }
}

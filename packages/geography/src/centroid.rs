//! Ring selection and vertex-average centroids.
//!
//! A region is represented by a single ring: the exterior ring of a
//! `Polygon`, or the exterior ring of the first part of a `MultiPolygon`.
//! Holes and later parts never contribute. The centroid is the plain mean
//! of the ring's vertices as listed, so a closing vertex that repeats the
//! first one is counted twice.

use geo::Coord;
use geojson::{Position, Value};
use ufo_map_geography_models::{Centroid, PolygonKind};

/// Outcome of picking the label ring from a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingSelection<'a> {
    /// A ring to average, and the geometry type it came from.
    Ring(PolygonKind, &'a [Position]),
    /// The geometry type has no label ring (points, lines, collections).
    Unsupported(&'static str),
}

/// Picks the ring used for the centroid.
///
/// # Errors
///
/// Returns a description of the problem if a `Polygon` has no rings or a
/// `MultiPolygon` has no parts.
pub fn select_ring(value: &Value) -> Result<RingSelection<'_>, String> {
    match value {
        Value::Polygon(rings) => rings
            .first()
            .map(|ring| RingSelection::Ring(PolygonKind::Polygon, ring.as_slice()))
            .ok_or_else(|| "Polygon has no rings".to_string()),
        Value::MultiPolygon(parts) => parts
            .first()
            .and_then(|rings| rings.first())
            .map(|ring| RingSelection::Ring(PolygonKind::MultiPolygon, ring.as_slice()))
            .ok_or_else(|| "MultiPolygon has no rings in its first part".to_string()),
        Value::Point(_) => Ok(RingSelection::Unsupported("Point")),
        Value::MultiPoint(_) => Ok(RingSelection::Unsupported("MultiPoint")),
        Value::LineString(_) => Ok(RingSelection::Unsupported("LineString")),
        Value::MultiLineString(_) => Ok(RingSelection::Unsupported("MultiLineString")),
        Value::GeometryCollection(_) => Ok(RingSelection::Unsupported("GeometryCollection")),
    }
}

/// Averages a ring's vertices. Positions are `[lon, lat, ...]`; any extra
/// ordinates (altitude) are ignored.
///
/// # Errors
///
/// Returns a description of the problem if the ring is empty or a
/// position has fewer than two ordinates.
pub fn vertex_mean(ring: &[Position]) -> Result<Centroid, String> {
    if ring.is_empty() {
        return Err("ring has no positions".to_string());
    }

    let mut sum = Coord { x: 0.0, y: 0.0 };
    for (i, position) in ring.iter().enumerate() {
        let [x, y, ..] = position.as_slice() else {
            return Err(format!(
                "position {i} has {} ordinate(s), expected at least 2",
                position.len()
            ));
        };
        sum = sum + Coord { x: *x, y: *y };
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = sum / ring.len() as f64;

    Ok(Centroid {
        lat: mean.y,
        lon: mean.x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[[f64; 2]]) -> Vec<Position> {
        points.iter().map(|p| p.to_vec()).collect()
    }

    #[test]
    fn averages_ring_vertices() {
        let square = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
        let centroid = vertex_mean(&square).unwrap();
        assert!((centroid.lat - 1.0).abs() < 1e-12);
        assert!((centroid.lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn counts_closing_vertex() {
        let closed = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);
        let centroid = vertex_mean(&closed).unwrap();
        assert!((centroid.lon - 0.8).abs() < 1e-12);
        assert!((centroid.lat - 0.8).abs() < 1e-12);
    }

    #[test]
    fn is_biased_toward_dense_vertices() {
        // Extra vertices along one edge pull the mean off the square's
        // geometric centre.
        let dense = ring(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
        let centroid = vertex_mean(&dense).unwrap();
        assert!((centroid.lon - 0.8).abs() < 1e-12);
        assert!((centroid.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ignores_altitude() {
        let with_z = vec![vec![1.0, 3.0, 100.0], vec![3.0, 5.0, 200.0]];
        let centroid = vertex_mean(&with_z).unwrap();
        assert!((centroid.lon - 2.0).abs() < 1e-12);
        assert!((centroid.lat - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_ring() {
        assert!(vertex_mean(&[]).is_err());
    }

    #[test]
    fn rejects_short_position() {
        let bad = vec![vec![1.0, 2.0], vec![3.0]];
        let err = vertex_mean(&bad).unwrap_err();
        assert!(err.contains("position 1"));
    }

    #[test]
    fn polygon_uses_exterior_ring() {
        let exterior = ring(&[[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0]]);
        let hole = ring(&[[1.0, 1.0], [1.0, 2.0], [2.0, 2.0]]);
        let value = Value::Polygon(vec![exterior.clone(), hole]);
        assert_eq!(
            select_ring(&value).unwrap(),
            RingSelection::Ring(PolygonKind::Polygon, exterior.as_slice())
        );
    }

    #[test]
    fn multipolygon_uses_first_part_only() {
        let first = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
        let second = ring(&[[10.0, 10.0], [10.0, 12.0], [12.0, 12.0], [12.0, 10.0]]);
        let value = Value::MultiPolygon(vec![vec![first.clone()], vec![second]]);
        assert_eq!(
            select_ring(&value).unwrap(),
            RingSelection::Ring(PolygonKind::MultiPolygon, first.as_slice())
        );
    }

    #[test]
    fn other_geometries_are_unsupported() {
        let point = Value::Point(vec![1.0, 2.0]);
        assert_eq!(
            select_ring(&point).unwrap(),
            RingSelection::Unsupported("Point")
        );
        let line = Value::LineString(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(
            select_ring(&line).unwrap(),
            RingSelection::Unsupported("LineString")
        );
    }

    #[test]
    fn empty_polygons_are_errors() {
        assert!(select_ring(&Value::Polygon(vec![])).is_err());
        assert!(select_ring(&Value::MultiPolygon(vec![])).is_err());
        assert!(select_ring(&Value::MultiPolygon(vec![vec![]])).is_err());
    }
}

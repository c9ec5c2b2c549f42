//! Boundary document loading and per-region centroid extraction.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson};
use ufo_map_geography_models::BoundaryRegion;
use ufo_map_sighting_models::{Resolved, UnknownReason, coerce};

use crate::GeoError;
use crate::centroid::{RingSelection, select_ring, vertex_mean};

/// Reads and parses the boundary document at `path`.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read, is not valid `GeoJSON`,
/// or is not a `FeatureCollection`.
pub fn load_boundaries(path: &Path) -> Result<FeatureCollection, GeoError> {
    log::info!("Reading boundaries from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_boundaries(&text)
}

/// Parses a boundary document.
///
/// # Errors
///
/// Returns [`GeoError`] if the text is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn parse_boundaries(text: &str) -> Result<FeatureCollection, GeoError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => {
            log::info!("Parsed {} boundary features", collection.features.len());
            Ok(collection)
        }
        GeoJson::Feature(_) => Err(GeoError::NotFeatureCollection { found: "Feature" }),
        GeoJson::Geometry(_) => Err(GeoError::NotFeatureCollection { found: "Geometry" }),
    }
}

/// Reduces every `Polygon`/`MultiPolygon` feature to a [`BoundaryRegion`].
///
/// Regions come back in feature order with no sorting or deduplication.
/// Features of any other geometry type produce no region. Regions whose
/// name is missing are still returned, with an unknown name.
///
/// # Errors
///
/// Returns [`GeoError`] if any feature has no geometry or has coordinates
/// that cannot be averaged. One bad feature fails the whole extraction.
pub fn extract_region_centroids(
    collection: &FeatureCollection,
    name_property: &str,
) -> Result<Vec<BoundaryRegion>, GeoError> {
    let mut regions = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(GeoError::MissingGeometry { feature: index })?;

        let malformed = |message: String| GeoError::MalformedGeometry {
            feature: index,
            message,
        };

        let (kind, ring) = match select_ring(&geometry.value).map_err(malformed)? {
            RingSelection::Ring(kind, ring) => (kind, ring),
            RingSelection::Unsupported(found) => {
                log::debug!("Skipping feature {index}: {found} geometry has no label ring");
                continue;
            }
        };

        let centroid = vertex_mean(ring).map_err(malformed)?;

        regions.push(BoundaryRegion {
            feature_index: index,
            name: region_name(feature, name_property),
            kind,
            centroid,
        });
    }

    log::info!(
        "Extracted {} region centroids from {} features",
        regions.len(),
        collection.features.len()
    );

    Ok(regions)
}

/// Reads the region name property. Strings are kept as written (trimmed),
/// numbers and booleans are rendered as text, anything else is missing.
fn region_name(feature: &Feature, name_property: &str) -> Resolved<String> {
    match feature.property(name_property) {
        Some(serde_json::Value::String(name)) => coerce::text(name).map(str::to_string),
        Some(serde_json::Value::Number(number)) => Resolved::Known(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Resolved::Known(flag.to_string()),
        _ => Resolved::Unknown(UnknownReason::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufo_map_geography_models::PolygonKind;

    const NAME: &str = "CDTFA_CITY";

    fn collection(features: &serde_json::Value) -> FeatureCollection {
        let doc = serde_json::json!({ "type": "FeatureCollection", "features": features });
        parse_boundaries(&doc.to_string()).unwrap()
    }

    fn polygon_feature(name: &str, ring: &serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { NAME: name },
            "geometry": { "type": "Polygon", "coordinates": [ring] }
        })
    }

    #[test]
    fn polygon_centroid_is_vertex_mean() {
        let features = serde_json::json!([polygon_feature(
            "Fresno",
            &serde_json::json!([[-120.0, 36.0], [-120.0, 37.0], [-119.0, 37.0], [-119.0, 36.0]])
        )]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, Resolved::Known("Fresno".to_string()));
        assert_eq!(regions[0].kind, PolygonKind::Polygon);
        assert!((regions[0].centroid.lat - 36.5).abs() < 1e-12);
        assert!((regions[0].centroid.lon - -119.5).abs() < 1e-12);
    }

    #[test]
    fn multipolygon_uses_first_part() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": { NAME: "Channel Islands" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]],
                    [[[10.0, 10.0], [10.0, 20.0], [20.0, 20.0], [20.0, 10.0]]]
                ]
            }
        }]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert_eq!(regions[0].kind, PolygonKind::MultiPolygon);
        assert!((regions[0].centroid.lat - 1.0).abs() < 1e-12);
        assert!((regions[0].centroid.lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn skips_non_polygon_features() {
        let features = serde_json::json!([
            {
                "type": "Feature",
                "properties": { NAME: "Marker" },
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
            },
            {
                "type": "Feature",
                "properties": { NAME: "Road" },
                "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]] }
            },
            polygon_feature("Clovis", &serde_json::json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]))
        ]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].feature_index, 2);
        assert_eq!(regions[0].label(), "Clovis");
    }

    #[test]
    fn keeps_feature_order_and_duplicates() {
        let ring = serde_json::json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let features = serde_json::json!([
            polygon_feature("Tulare", &ring),
            polygon_feature("Madera", &ring),
            polygon_feature("Tulare", &ring)
        ]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();
        let names: Vec<String> = regions.iter().map(BoundaryRegion::label).collect();

        assert_eq!(names, ["Tulare", "Madera", "Tulare"]);
    }

    #[test]
    fn missing_name_is_unknown_but_still_extracted() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": { "OTHER": "x" },
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]] }
        }]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name.reason(), Some(UnknownReason::Missing));
        assert_eq!(regions[0].label(), "Unknown");
    }

    #[test]
    fn null_properties_are_unknown() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": null,
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]] }
        }]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert!(!regions[0].name.is_known());
    }

    #[test]
    fn numeric_names_become_text() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": { NAME: 42 },
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]] }
        }]);
        let regions = extract_region_centroids(&collection(&features), NAME).unwrap();

        assert_eq!(regions[0].label(), "42");
    }

    #[test]
    fn reads_configured_name_property() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": { "NAME": "Visalia" },
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]] }
        }]);
        let regions = extract_region_centroids(&collection(&features), "NAME").unwrap();

        assert_eq!(regions[0].label(), "Visalia");
    }

    #[test]
    fn empty_ring_fails_whole_extraction() {
        let features = serde_json::json!([
            polygon_feature("Fresno", &serde_json::json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])),
            polygon_feature("Broken", &serde_json::json!([]))
        ]);
        let err = extract_region_centroids(&collection(&features), NAME).unwrap_err();

        assert!(matches!(err, GeoError::MalformedGeometry { feature: 1, .. }));
    }

    #[test]
    fn short_position_is_fatal() {
        let features = serde_json::json!([polygon_feature(
            "Broken",
            &serde_json::json!([[0.0, 0.0], [1.0], [1.0, 1.0]])
        )]);
        let doc = serde_json::json!({ "type": "FeatureCollection", "features": features });
        let outcome = parse_boundaries(&doc.to_string())
            .and_then(|collection| extract_region_centroids(&collection, NAME));

        // Either the parser or the extractor must refuse the position.
        assert!(matches!(
            outcome,
            Err(GeoError::GeoJson(_) | GeoError::MalformedGeometry { feature: 0, .. })
        ));
    }

    #[test]
    fn missing_geometry_is_fatal() {
        let features = serde_json::json!([{
            "type": "Feature",
            "properties": { NAME: "Nowhere" },
            "geometry": null
        }]);
        let err = extract_region_centroids(&collection(&features), NAME).unwrap_err();

        assert!(matches!(err, GeoError::MissingGeometry { feature: 0 }));
    }

    #[test]
    fn non_numeric_coordinates_fail_to_parse() {
        let doc = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},
            "geometry":{"type":"Polygon","coordinates":[[["a","b"]]]}}]}"#;

        assert!(matches!(parse_boundaries(doc), Err(GeoError::GeoJson(_))));
    }

    #[test]
    fn rejects_bare_geometry_document() {
        let doc = r#"{"type":"Point","coordinates":[1.0,2.0]}"#;

        assert!(matches!(
            parse_boundaries(doc),
            Err(GeoError::NotFeatureCollection { found: "Geometry" })
        ));
    }
}

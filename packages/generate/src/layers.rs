//! Data behind the map overlays: sighting markers, heatmap points, and
//! region labels.

use std::sync::Arc;

use serde::Serialize;
use ufo_map_config::ReportConfig;
use ufo_map_geography_models::BoundaryRegion;
use ufo_map_sighting_models::{RAW_MISSING, Resolved, SightingRecord, UNKNOWN};
use ufo_map_source::progress::ProgressCallback;

use crate::popup::{escape_html, popup_html};

/// One clustered sighting marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPoint {
    pub lat: f64,
    pub lon: f64,
    /// Pre-rendered popup HTML.
    pub popup: String,
}

/// One region name label anchored at the region centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLabel {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub major: bool,
    /// Pre-rendered label HTML.
    pub html: String,
}

/// Builds one marker per record, in record order.
#[must_use]
pub fn marker_points(
    records: &[SightingRecord],
    progress: &Arc<dyn ProgressCallback>,
) -> Vec<MarkerPoint> {
    progress.set_message("Building markers".to_string());
    progress.set_total(records.len() as u64);

    let markers: Vec<MarkerPoint> = records
        .iter()
        .map(|record| {
            let marker = MarkerPoint {
                lat: record.latitude,
                lon: record.longitude,
                popup: popup_html(record),
            };
            progress.inc(1);
            marker
        })
        .collect();

    progress.finish(format!("Built {} markers", markers.len()));
    markers
}

/// One `[lat, lon]` heatmap point per record, unweighted.
#[must_use]
pub fn heat_points(records: &[SightingRecord]) -> Vec<[f64; 2]> {
    records
        .iter()
        .map(|record| [record.latitude, record.longitude])
        .collect()
}

/// Returns `true` if a region name is worth drawing: it must be known,
/// not a missing-value placeholder, and at least two characters long.
#[must_use]
pub fn is_labelable(name: &Resolved<String>) -> bool {
    name.known().is_some_and(|name| {
        name != UNKNOWN && name != RAW_MISSING && name.chars().count() >= 2
    })
}

/// Builds the label for every region that passes [`is_labelable`], in
/// region order. Duplicated names produce duplicated labels.
#[must_use]
pub fn region_labels(regions: &[BoundaryRegion], config: &ReportConfig) -> Vec<RegionLabel> {
    let labels: Vec<RegionLabel> = regions
        .iter()
        .filter(|region| is_labelable(&region.name))
        .map(|region| {
            let name = region.label();
            let major = config.is_major_city(&name);
            RegionLabel {
                lat: region.centroid.lat,
                lon: region.centroid.lon,
                html: label_html(&name, major),
                name,
                major,
            }
        })
        .collect();

    let skipped = regions.len() - labels.len();
    if skipped > 0 {
        log::warn!("{skipped} region(s) have no usable name and will not be labelled");
    }

    labels
}

/// Label markup. Major regions get the larger bold `major-city` style,
/// the rest the `minor-city` style; the zoom handler keys off these
/// classes.
fn label_html(name: &str, major: bool) -> String {
    let (font_size, font_weight, class) = if major {
        ("16px", "bold", "major-city")
    } else {
        ("13px", "normal", "minor-city")
    };
    let name = escape_html(name);

    format!(
        "<div class=\"city-label {class}\" data-city-name=\"{name}\" \
         style=\"font-size: {font_size}; font-weight: {font_weight};\">{name}</div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufo_map_geography_models::{Centroid, PolygonKind};
    use ufo_map_sighting_models::UnknownReason;
    use ufo_map_source::progress::null_progress;

    fn region(name: Resolved<String>) -> BoundaryRegion {
        BoundaryRegion {
            feature_index: 0,
            name,
            kind: PolygonKind::Polygon,
            centroid: Centroid {
                lat: 36.5,
                lon: -119.5,
            },
        }
    }

    fn named(name: &str) -> BoundaryRegion {
        region(Resolved::Known(name.to_string()))
    }

    fn record(lat: f64, lon: f64) -> SightingRecord {
        SightingRecord {
            shape: "disk".to_string(),
            description: "No description".to_string(),
            city: "Fresno".to_string(),
            latitude: lat,
            longitude: lon,
            year: "2010".to_string(),
            month: "7".to_string(),
            day: "4".to_string(),
        }
    }

    #[test]
    fn label_filter_drops_placeholders_and_short_names() {
        assert!(is_labelable(&Resolved::Known("Fresno".to_string())));
        assert!(is_labelable(&Resolved::Known("Ai".to_string())));
        assert!(!is_labelable(&Resolved::Known("Unknown".to_string())));
        assert!(!is_labelable(&Resolved::Known("nan".to_string())));
        assert!(!is_labelable(&Resolved::Known(String::new())));
        assert!(!is_labelable(&Resolved::Known("X".to_string())));
        assert!(!is_labelable(&Resolved::Unknown(UnknownReason::Missing)));
    }

    #[test]
    fn major_regions_get_major_style() {
        let config = ReportConfig::default();
        let labels = region_labels(&[named("Fresno"), named("Clovis")], &config);

        assert_eq!(labels.len(), 2);
        assert!(labels[0].major);
        assert!(labels[0].html.contains("major-city"));
        assert!(labels[0].html.contains("font-size: 16px; font-weight: bold;"));
        assert!(!labels[1].major);
        assert!(labels[1].html.contains("minor-city"));
        assert!(labels[1].html.contains("font-size: 13px; font-weight: normal;"));
    }

    #[test]
    fn labels_keep_order_and_duplicates() {
        let config = ReportConfig::default();
        let regions = [
            named("Tulare"),
            region(Resolved::Unknown(UnknownReason::Missing)),
            named("Madera"),
            named("Tulare"),
        ];
        let names: Vec<String> = region_labels(&regions, &config)
            .into_iter()
            .map(|label| label.name)
            .collect();

        assert_eq!(names, ["Tulare", "Madera", "Tulare"]);
    }

    #[test]
    fn label_names_are_escaped() {
        let config = ReportConfig::default();
        let labels = region_labels(&[named("A&B <Town>")], &config);

        assert!(labels[0].html.contains(">A&amp;B &lt;Town&gt;</div>"));
        assert_eq!(labels[0].name, "A&B <Town>");
    }

    #[test]
    fn one_marker_and_heat_point_per_record() {
        let records = [record(36.1, -119.1), record(36.2, -119.2)];
        let markers = marker_points(&records, &null_progress());
        let heat = heat_points(&records);

        assert_eq!(markers.len(), 2);
        assert!((markers[1].lat - 36.2).abs() < f64::EPSILON);
        assert!(markers[0].popup.contains("7/4/2010"));
        assert_eq!(heat, vec![[36.1, -119.1], [36.2, -119.2]]);
    }
}

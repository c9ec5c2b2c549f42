//! Self-contained HTML document assembly.
//!
//! Stylesheets and the map script are embedded at compile time. Leaflet
//! and its cluster and heatmap plugins are linked from a CDN. All layer
//! data goes into a single JSON object assigned to `window.UFO_MAP_DATA`
//! ahead of the map script.

use std::fmt::Write as _;

use serde::Serialize;
use ufo_map_config::{LabelZoom, LayerVisibility, PopupStyle, TileConfig};

use crate::layers::{MarkerPoint, RegionLabel};

const POPUP_CSS: &str = include_str!("../assets/popup.css");
const DASHBOARD_CSS: &str = include_str!("../assets/dashboard.css");
const MAP_JS: &str = include_str!("../assets/map.js");

const STYLESHEETS: &[&str] = &[
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css",
];

const SCRIPTS: &[&str] = &[
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js",
    "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js",
];

/// Everything the map script needs, serialized into the document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPayload<'a> {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: &'a TileConfig,
    pub layers: LayerVisibility,
    pub label_zoom: LabelThresholds,
    pub boundary_name_property: &'a str,
    pub tooltip_alias: &'a str,
    pub markers: Vec<MarkerPoint>,
    pub heat: Vec<[f64; 2]>,
    pub boundaries: &'a geojson::FeatureCollection,
    pub labels: Vec<RegionLabel>,
}

/// Label zoom thresholds as the map script reads them.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelThresholds {
    pub hide_below: u8,
    pub major_only_below: u8,
}

impl From<LabelZoom> for LabelThresholds {
    fn from(zoom: LabelZoom) -> Self {
        Self {
            hide_below: zoom.hide_below,
            major_only_below: zoom.major_only_below,
        }
    }
}

/// Serializes `value` for inline use inside a `<script>` element.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Strips characters that could end a CSS declaration or the enclosing
/// `<style>` element.
#[must_use]
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

/// Assembles the complete document.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn render_document(
    title: &str,
    payload: &MapPayload<'_>,
    palette: &PopupStyle,
    dashboard: &str,
) -> Result<String, serde_json::Error> {
    let data = script_json(payload)?;

    let mut html = String::with_capacity(data.len() + 32 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    writeln!(html, "<title>{}</title>", crate::popup::escape_html(title)).unwrap();

    for href in STYLESHEETS {
        writeln!(html, "<link rel=\"stylesheet\" href=\"{href}\" />").unwrap();
    }

    writeln!(
        html,
        "<style>\n:root {{\n  --popup-background: {};\n  --popup-text: {};\n  \
         --popup-border: {};\n  --popup-header: {};\n}}\n</style>",
        css_value(&palette.background_color),
        css_value(&palette.text_color),
        css_value(&palette.border_color),
        css_value(&palette.header_color),
    )
    .unwrap();
    writeln!(html, "<style>\n{POPUP_CSS}</style>").unwrap();
    writeln!(html, "<style>\n{DASHBOARD_CSS}</style>").unwrap();

    for src in SCRIPTS {
        writeln!(html, "<script src=\"{src}\"></script>").unwrap();
    }

    html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n");
    html.push_str(dashboard);
    html.push('\n');
    writeln!(html, "<script>\nwindow.UFO_MAP_DATA = {data};\n</script>").unwrap();
    writeln!(html, "<script>\n{MAP_JS}</script>").unwrap();
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

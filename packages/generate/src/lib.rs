#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map report composer.
//!
//! Turns the loaded sightings, the boundary document with its region
//! centroids, and the statistics summary into one self-contained HTML
//! document: clustered markers with styled popups, a heatmap, region
//! boundaries with hover highlight, zoom-responsive region labels, and a
//! collapsible statistics panel.
//!
//! The document is written through a temporary file and renamed into
//! place, so a failed run never leaves a partial report behind.

pub mod dashboard;
pub mod document;
pub mod layers;
pub mod popup;

use std::path::Path;
use std::sync::Arc;

use geojson::FeatureCollection;
use ufo_map_analytics_models::StatisticsSummary;
use ufo_map_config::ReportConfig;
use ufo_map_geography_models::BoundaryRegion;
use ufo_map_sighting_models::SightingRecord;
use ufo_map_source::progress::ProgressCallback;

use crate::document::MapPayload;

/// Title of the generated document.
pub const REPORT_TITLE: &str = "UFO Sightings Map";

/// Errors that can occur while composing or writing the report.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// I/O error (directory creation, file write or rename).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization of the map data failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the report is built from.
pub struct ReportInputs<'a> {
    /// Sightings, one marker and heatmap point each.
    pub records: &'a [SightingRecord],
    /// Boundary document, drawn as-is.
    pub boundaries: &'a FeatureCollection,
    /// Region centroids extracted from `boundaries`, used for labels.
    pub regions: &'a [BoundaryRegion],
    /// Dashboard figures.
    pub summary: &'a StatisticsSummary,
}

/// Composes the full HTML document.
///
/// # Errors
///
/// Returns [`GenerateError::Json`] if the map data cannot be serialized.
pub fn compose_report(
    inputs: &ReportInputs<'_>,
    config: &ReportConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<String, GenerateError> {
    let markers = layers::marker_points(inputs.records, progress);
    let heat = layers::heat_points(inputs.records);
    let labels = layers::region_labels(inputs.regions, config);

    log::info!(
        "Composing report: {} markers, {} heatmap points, {} boundary features, {} labels",
        markers.len(),
        heat.len(),
        inputs.boundaries.features.len(),
        labels.len()
    );

    let payload = MapPayload {
        center: config.map.center,
        zoom: config.map.zoom,
        tiles: &config.map.tiles,
        layers: config.layers,
        label_zoom: config.labels.into(),
        boundary_name_property: &config.boundaries.name_property,
        tooltip_alias: &config.boundaries.tooltip_alias,
        markers,
        heat,
        boundaries: inputs.boundaries,
        labels,
    };

    let panel = dashboard::dashboard_html(inputs.summary);

    Ok(document::render_document(
        REPORT_TITLE,
        &payload,
        &config.popup_style,
        &panel,
    )?)
}

/// Writes the document to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] if a directory cannot be created or the
/// file cannot be written. The temporary file is removed on failure.
pub fn write_report(path: &Path, html: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");

    if let Err(e) = std::fs::write(&tmp_path, html).and_then(|()| std::fs::rename(&tmp_path, path))
    {
        std::fs::remove_file(&tmp_path).ok();
        return Err(e.into());
    }

    log::info!("Report written: {} ({} bytes)", path.display(), html.len());
    Ok(())
}

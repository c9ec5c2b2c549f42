//! Report pipeline.
//!
//! Loads the sighting records and the boundary document, extracts region
//! centroids, computes the summary, composes the document, and writes it.
//! Any failure stops the run before the output file is touched.

use std::time::Instant;

use ufo_map_analytics_models::StatisticsSummary;
use ufo_map_cli_utils::{IndicatifProgress, MultiProgress};
use ufo_map_config::ReportConfig;
use ufo_map_generate::{ReportInputs, compose_report, write_report};
use ufo_map_geography_models::PolygonKind;
use ufo_map_source::loader::{RecordSourceConfig, load_sightings};

/// Runs every step for `config` and returns the computed summary.
///
/// # Errors
///
/// Returns the first error from loading records or boundaries, extracting
/// centroids, or writing the report.
pub fn run(
    config: &ReportConfig,
    multi: &MultiProgress,
) -> Result<StatisticsSummary, Box<dyn std::error::Error>> {
    let started = Instant::now();

    log::info!("[1/4] Loading sightings...");
    let records_bar = IndicatifProgress::records_bar(multi, "Reading sightings");
    let source = RecordSourceConfig {
        fields: &config.records.fields,
        state: &config.records.state,
        delimiter: config.records.delimiter_byte()?,
    };
    let records = load_sightings(&config.paths.records, &source, &records_bar)?;

    log::info!("[2/4] Loading boundaries...");
    let boundaries = ufo_map_geography::boundaries::load_boundaries(&config.paths.boundaries)?;
    let regions = ufo_map_geography::boundaries::extract_region_centroids(
        &boundaries,
        &config.boundaries.name_property,
    )?;
    let multi_part = regions
        .iter()
        .filter(|r| r.kind == PolygonKind::MultiPolygon)
        .count();
    if multi_part > 0 {
        log::info!("{multi_part} multi-part region(s) labelled at their first part");
    }

    log::info!("[3/4] Computing statistics...");
    let summary = ufo_map_analytics::compute_summary(&records);
    if !summary.year_counts.is_empty() {
        log::info!("Busiest years: {}", busiest_years(&summary));
    }

    log::info!("[4/4] Composing report...");
    let markers_bar = IndicatifProgress::batch_bar(multi, "Building markers");
    let inputs = ReportInputs {
        records: &records,
        boundaries: &boundaries,
        regions: &regions,
        summary: &summary,
    };
    let html = compose_report(&inputs, config, &markers_bar)?;
    write_report(&config.paths.output, &html)?;

    log::info!(
        "Pipeline complete in {:.1}s",
        started.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// `"2012 (2), 2013 (1)"` from the ranked year counts.
fn busiest_years(summary: &StatisticsSummary) -> String {
    summary
        .year_counts
        .iter()
        .map(|r| format!("{} ({})", r.label, r.count))
        .collect::<Vec<_>>()
        .join(", ")
}

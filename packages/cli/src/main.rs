#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Builds the UFO sighting map report.
//!
//! Reads the configured sighting records and boundary document, writes a
//! single self-contained HTML map, and prints a short summary.
//!
//! Uses `indicatif-log-bridge` (via [`ufo_map_cli_utils::init_logger`])
//! so log lines and progress bars do not fight for the terminal.

mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use ufo_map_config::ReportConfig;
use ufo_map_generate::dashboard::format_thousands;

#[derive(Parser)]
#[command(name = "ufo_map", about = "UFO sighting map report generator")]
struct Cli {
    /// TOML config file layered over the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sighting record file (overrides `paths.records`)
    #[arg(long)]
    records: Option<PathBuf>,

    /// `GeoJSON` boundary document (overrides `paths.boundaries`)
    #[arg(long)]
    boundaries: Option<PathBuf>,

    /// Output HTML file (overrides `paths.output`)
    #[arg(long)]
    output: Option<PathBuf>,

    /// State code to keep (overrides `records.state`)
    #[arg(long)]
    state: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ReportConfig, ufo_map_config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };

        if let Some(records) = self.records {
            config.paths.records = records;
        }
        if let Some(boundaries) = self.boundaries {
            config.paths.boundaries = boundaries;
        }
        if let Some(output) = self.output {
            config.paths.output = output;
        }
        if let Some(state) = self.state {
            config.records.state = state;
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = ufo_map_cli_utils::init_logger();
    let config = Cli::parse().into_config()?;

    let summary = pipeline::run(&config, &multi)?;

    println!("Map saved to {}", config.paths.output.display());
    println!("Statistics Dashboard Added:");
    println!(
        "  - Total Sightings: {}",
        format_thousands(summary.total_sightings)
    );
    println!("  - Unique Cities: {}", summary.unique_cities);
    println!("  - Most Common Shape: {}", summary.most_common_shape);
    println!("  - Peak Year: {}", summary.peak_year);

    Ok(())
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report configuration.
//!
//! A [`ReportConfig`] describes everything about one report run: the
//! initial map view, where the inputs live and where the document goes,
//! how record columns map to fields, which regions count as major, and
//! how popups and layers are styled.
//!
//! The default configuration is embedded at compile time from
//! `config/default.toml`. A custom file only needs the keys it changes;
//! tables are merged key by key over the embedded defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ufo_map_sighting_models::FieldMapping;

const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the expected shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The record delimiter is not a single ASCII character.
    #[error("Record delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
}

/// Complete configuration for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Region names drawn with the larger, bold label style.
    pub major_cities: Vec<String>,
    /// Initial map view and base tiles.
    pub map: MapConfig,
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Record file layout and filter.
    pub records: RecordsConfig,
    /// Boundary document properties.
    pub boundaries: BoundariesConfig,
    /// Popup colour palette.
    pub popup_style: PopupStyle,
    /// Zoom thresholds for region labels.
    pub labels: LabelZoom,
    /// Initial visibility of each layer.
    pub layers: LayerVisibility,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// `[lat, lon]` the map opens on.
    pub center: [f64; 2],
    /// Zoom level the map opens at.
    pub zoom: u8,
    /// Base tile layer.
    pub tiles: TileConfig,
}

/// Base tile layer source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileConfig {
    /// Leaflet URL template (`{z}/{x}/{y}`).
    pub url: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Delimited sighting record file.
    pub records: PathBuf,
    /// `GeoJSON` boundary document.
    pub boundaries: PathBuf,
    /// HTML document to write.
    pub output: PathBuf,
}

/// Record file layout and filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// State code rows must carry to be kept.
    pub state: String,
    /// Field delimiter, one ASCII character.
    pub delimiter: String,
    /// Column name for each field.
    pub fields: FieldMapping,
}

impl RecordsConfig {
    /// The delimiter as the byte the CSV reader expects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelimiter`] unless the delimiter is
    /// exactly one ASCII character.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}

/// Boundary document properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundariesConfig {
    /// Feature property holding the region name.
    pub name_property: String,
    /// Label shown before the name in the boundary tooltip.
    pub tooltip_alias: String,
}

/// Popup colour palette (CSS colours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupStyle {
    pub background_color: String,
    pub text_color: String,
    pub border_color: String,
    pub header_color: String,
}

/// Zoom thresholds for region labels.
///
/// Below `hide_below` no label is shown; below `major_only_below` only
/// major labels are shown; at or above it every label is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelZoom {
    pub hide_below: u8,
    pub major_only_below: u8,
}

/// Whether each overlay starts visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    pub markers: bool,
    pub heatmap: bool,
    pub boundaries: bool,
    pub labels: bool,
}

impl Default for ReportConfig {
    /// The embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config/default.toml` is malformed (it is embedded at
    /// compile time and checked by this crate's tests).
    fn default() -> Self {
        Self::from_toml_str("")
            .unwrap_or_else(|e| panic!("Failed to parse embedded default config: {e}"))
    }
}

impl ReportConfig {
    /// Loads a configuration file, falling back to the embedded defaults
    /// for any key the file leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid
    /// TOML, has values of the wrong type, or names an invalid delimiter.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Reading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration text layered over the embedded defaults.
    ///
    /// # Errors
    ///
    /// See [`ReportConfig::load`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(DEFAULT_TOML)?;
        let overrides: toml::Table = toml::from_str(text)?;
        merge_tables(&mut table, overrides);

        let config: Self = toml::Value::Table(table).try_into()?;
        config.records.delimiter_byte()?;

        if config.labels.hide_below > config.labels.major_only_below {
            log::warn!(
                "labels.hide_below ({}) is above labels.major_only_below ({}); \
                 major-only labels will never show",
                config.labels.hide_below,
                config.labels.major_only_below
            );
        }

        Ok(config)
    }

    /// Whether `name` is listed in [`ReportConfig::major_cities`].
    #[must_use]
    pub fn is_major_city(&self, name: &str) -> bool {
        self.major_cities.iter().any(|city| city == name)
    }
}

/// Recursively overlays `overrides` on `base`. Nested tables merge key by
/// key; any other value replaces the base value outright.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

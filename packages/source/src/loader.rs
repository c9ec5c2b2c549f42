//! Delimited record file reader.
//!
//! The header row is resolved against the [`FieldMapping`] once; every
//! data row is then read by column position. Rows for other states are
//! skipped, rows for the target state must carry both coordinates.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::StringRecord;
use ufo_map_sighting_models::{
    FieldMapping, FieldRole, NO_DESCRIPTION, RAW_MISSING, Resolved, SightingRecord, UnknownReason,
};

use crate::SourceError;
use crate::parsing::{optional_text, parse_coordinate, text_or};
use crate::progress::ProgressCallback;

/// Configuration for reading a record file.
pub struct RecordSourceConfig<'a> {
    /// Column names for each field role.
    pub fields: &'a FieldMapping,
    /// Only rows whose state column equals this code are kept (e.g. `"CA"`).
    pub state: &'a str,
    /// Field delimiter byte.
    pub delimiter: u8,
}

/// Header positions of every mapped column.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    shape: usize,
    description: usize,
    city: usize,
    latitude: usize,
    longitude: usize,
    year: usize,
    month: usize,
    day: usize,
    state: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, fields: &FieldMapping) -> Result<Self, SourceError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();

        let mut positions = [0_usize; 9];
        for (slot, (role, column)) in positions.iter_mut().zip(fields.columns()) {
            *slot = names
                .iter()
                .position(|name| *name == column.trim())
                .ok_or_else(|| SourceError::MissingColumn {
                    role,
                    column: column.to_string(),
                })?;
        }

        let [
            shape,
            description,
            city,
            latitude,
            longitude,
            year,
            month,
            day,
            state,
        ] = positions;

        Ok(Self {
            shape,
            description,
            city,
            latitude,
            longitude,
            year,
            month,
            day,
            state,
        })
    }
}

/// Reads the record file at `path`.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened, is not valid
/// delimited text, lacks a mapped column, or has a target-state row
/// without a usable latitude/longitude.
pub fn load_sightings(
    path: &Path,
    config: &RecordSourceConfig<'_>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<SightingRecord>, SourceError> {
    log::info!("Reading sightings from {}", path.display());
    let file = File::open(path)?;
    read_sightings(file, config, progress)
}

/// Reads sighting records from any delimited text source.
///
/// # Errors
///
/// See [`load_sightings`].
pub fn read_sightings<R: Read>(
    input: R,
    config: &RecordSourceConfig<'_>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<SightingRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(input);

    let columns = ColumnIndex::resolve(reader.headers()?, config.fields)?;

    let mut records = Vec::new();
    let mut other_states: u64 = 0;

    for result in reader.records() {
        let row = result?;

        if cell(&row, columns.state) != config.state {
            other_states += 1;
            continue;
        }

        let line = row.position().map_or(0, csv::Position::line);

        records.push(SightingRecord {
            shape: text_or(cell(&row, columns.shape), RAW_MISSING),
            description: text_or(cell(&row, columns.description), NO_DESCRIPTION),
            city: text_or(cell(&row, columns.city), RAW_MISSING),
            latitude: required_coordinate(cell(&row, columns.latitude), line, FieldRole::Latitude)?,
            longitude: required_coordinate(
                cell(&row, columns.longitude),
                line,
                FieldRole::Longitude,
            )?,
            year: optional_text(cell(&row, columns.year)),
            month: optional_text(cell(&row, columns.month)),
            day: optional_text(cell(&row, columns.day)),
        });
        progress.inc(1);
    }

    log::info!(
        "Loaded {} sightings for state {} ({other_states} rows from other states skipped)",
        records.len(),
        config.state
    );
    progress.finish(format!("Loaded {} sightings", records.len()));

    Ok(records)
}

fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("").trim()
}

fn required_coordinate(raw: &str, line: u64, role: FieldRole) -> Result<f64, SourceError> {
    match parse_coordinate(raw) {
        Resolved::Known(value) => Ok(value),
        Resolved::Unknown(UnknownReason::Missing) => {
            Err(SourceError::MissingCoordinate { line, role })
        }
        Resolved::Unknown(_) => Err(SourceError::InvalidCoordinate {
            line,
            role,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::null_progress;

    const HEADER: &str = "Data.Shape,Data.Description excerpt,Location.City,Location.State,\
                          Location.Coordinates.Latitude ,Location.Coordinates.Longitude ,\
                          Dates.Sighted.Year,Dates.Sighted.Month,Date.Sighted.Day";

    fn read(body: &str) -> Result<Vec<SightingRecord>, SourceError> {
        let fields = FieldMapping::default();
        let config = RecordSourceConfig {
            fields: &fields,
            state: "CA",
            delimiter: b',',
        };
        let csv = format!("{HEADER}\n{body}");
        read_sightings(csv.as_bytes(), &config, &null_progress())
    }

    #[test]
    fn keeps_only_target_state() {
        let records = read(
            "disk,Bright light,Fresno,CA,36.73,-119.78,2010,7,4\n\
             light,Hovering,Reno,NV,39.52,-119.81,2011,8,5\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city, "Fresno");
        assert_eq!(records[0].shape, "disk");
        assert_eq!(records[0].year, "2010");
        assert!((records[0].latitude - 36.73).abs() < f64::EPSILON);
    }

    #[test]
    fn normalizes_missing_text_fields() {
        let records = read(",,,CA,36.73,-119.78,,,\n").unwrap();
        let record = &records[0];
        assert_eq!(record.shape, RAW_MISSING);
        assert_eq!(record.city, RAW_MISSING);
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.year, "");
        assert_eq!(record.month, "");
        assert_eq!(record.day, "");
    }

    #[test]
    fn matches_headers_ignoring_surrounding_whitespace() {
        let records = read("disk,x,Fresno,CA,36.73,-119.78,2010,7,4\n").unwrap();
        assert!((records[0].longitude - -119.78).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_column_is_fatal() {
        let mut fields = FieldMapping::default();
        fields.shape = "Shape Reported".to_string();
        let config = RecordSourceConfig {
            fields: &fields,
            state: "CA",
            delimiter: b',',
        };
        let csv = format!("{HEADER}\n");
        let err = read_sightings(csv.as_bytes(), &config, &null_progress()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingColumn {
                role: FieldRole::Shape,
                ..
            }
        ));
    }

    #[test]
    fn missing_latitude_is_fatal() {
        let err = read("disk,x,Fresno,CA,,-119.78,2010,7,4\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingCoordinate {
                line: 2,
                role: FieldRole::Latitude
            }
        ));
    }

    #[test]
    fn invalid_longitude_is_fatal() {
        let err = read("disk,x,Fresno,CA,36.73,west,2010,7,4\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidCoordinate {
                role: FieldRole::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn other_state_rows_need_no_coordinates() {
        let records = read("disk,x,Reno,NV,,,2010,7,4\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn honours_custom_delimiter() {
        let fields = FieldMapping::default();
        let config = RecordSourceConfig {
            fields: &fields,
            state: "CA",
            delimiter: b';',
        };
        let csv = format!(
            "{}\ndisk;x;Fresno;CA;36.73;-119.78;2010;7;4\n",
            HEADER.replace(',', ";")
        );
        let records = read_sightings(csv.as_bytes(), &config, &null_progress()).unwrap();
        assert_eq!(records.len(), 1);
    }
}

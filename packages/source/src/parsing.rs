//! Cell parsing helpers for the record loader.
//!
//! Every cell has already been trimmed of surrounding whitespace by the
//! time it reaches these functions.

use ufo_map_sighting_models::{Resolved, UnknownReason, coerce};

/// Parses a coordinate cell. Empty cells are [`UnknownReason::Missing`];
/// anything that is not a finite number is [`UnknownReason::NotNumeric`].
#[must_use]
pub fn parse_coordinate(raw: &str) -> Resolved<f64> {
    coerce::text(raw).and_then(|value| match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Resolved::Known(number),
        _ => Resolved::Unknown(UnknownReason::NotNumeric),
    })
}

/// Returns the cell text, or `fallback` when the cell is empty.
#[must_use]
pub fn text_or(raw: &str, fallback: &str) -> String {
    match coerce::text(raw) {
        Resolved::Known(value) => value.to_string(),
        Resolved::Unknown(_) => fallback.to_string(),
    }
}

/// Returns the trimmed cell text; an empty cell stays empty.
#[must_use]
pub fn optional_text(raw: &str) -> String {
    raw.trim().to_string()
}

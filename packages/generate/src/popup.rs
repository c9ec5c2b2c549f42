//! Marker popup content.

use std::borrow::Cow;
use std::fmt::Write as _;

use ufo_map_sighting_models::{RAW_MISSING, SightingRecord, UNKNOWN};

/// Encounter text longer than this many characters is truncated.
pub const ENCOUNTER_MAX_CHARS: usize = 150;

/// Characters of encounter text kept before the ellipsis.
const ENCOUNTER_KEEP_CHARS: usize = 147;

/// Formats the sighting date as `M/D/Y`.
///
/// A missing month or day is shown as `?` as long as the year is known;
/// without a year the date is `"Unknown"`.
#[must_use]
pub fn format_date(month: &str, day: &str, year: &str) -> String {
    let present = |part: &str| !part.is_empty() && part != RAW_MISSING;

    if !present(year) {
        return UNKNOWN.to_string();
    }

    let month = if present(month) { month } else { "?" };
    let day = if present(day) { day } else { "?" };

    format!("{month}/{day}/{year}")
}

/// Shortens encounter text longer than [`ENCOUNTER_MAX_CHARS`] characters
/// to its first 147 characters followed by `"..."`.
#[must_use]
pub fn truncate_encounter(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= ENCOUNTER_MAX_CHARS {
        return Cow::Borrowed(text);
    }

    let end = text
        .char_indices()
        .nth(ENCOUNTER_KEEP_CHARS)
        .map_or(text.len(), |(index, _)| index);

    Cow::Owned(format!("{}...", &text[..end]))
}

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds the popup body for one sighting.
#[must_use]
pub fn popup_html(record: &SightingRecord) -> String {
    let date = format_date(&record.month, &record.day, &record.year);
    let encounter = truncate_encounter(&record.description);

    let mut html = String::with_capacity(512);
    html.push_str(
        "<div class=\"ufo-popup-container\">\
         <div class=\"animated-border-box-glow\"></div>\
         <div class=\"animated-border-box\"></div>\
         <div class=\"ufo-popup-content\">\
         <h4>\u{1F6F8} UFO Sighting \u{1F6F8}</h4>",
    );

    for (label, value) in [
        ("Date", date.as_str()),
        ("City", record.city.as_str()),
        ("Shape", record.shape.as_str()),
        ("Encounter", encounter.as_ref()),
    ] {
        write!(
            html,
            "<div class=\"info-line\"><b>{label}:</b> {}</div>",
            escape_html(value)
        )
        .unwrap();
    }

    html.push_str("</div></div>");
    html
}

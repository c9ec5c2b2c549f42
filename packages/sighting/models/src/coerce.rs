//! Safe coercion from raw record text into [`Resolved`] values.
//!
//! Every place a raw cell may degrade to the `"Unknown"` sentinel goes
//! through one of these helpers, so the reason for the degrade is always
//! recorded as an [`UnknownReason`].

use chrono::Month;

use crate::{Resolved, UnknownReason};

/// Resolves a text cell, treating empty or whitespace-only text as missing.
#[must_use]
pub fn text(raw: &str) -> Resolved<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Resolved::Unknown(UnknownReason::Missing)
    } else {
        Resolved::Known(trimmed)
    }
}

/// Coerces a year cell to a number.
///
/// Any finite decimal is a year, so `"2010.5"` stays `2010.5` and is a
/// different value from `"2010"`. Values whose whole part does not fit an
/// `i32` are out of range.
#[must_use]
pub fn year(raw: &str) -> Resolved<f64> {
    text(raw).and_then(|value| {
        let Ok(number) = value.parse::<f64>() else {
            return Resolved::Unknown(UnknownReason::NotNumeric);
        };
        if number.is_nan() {
            return Resolved::Unknown(UnknownReason::NotNumeric);
        }
        if !number.is_finite()
            || number.trunc() < f64::from(i32::MIN)
            || number.trunc() > f64::from(i32::MAX)
        {
            return Resolved::Unknown(UnknownReason::OutOfRange);
        }

        // Folds `-0.0` into `0.0` so both count as one value.
        Resolved::Known(number + 0.0)
    })
}

/// Whole part of a coerced [`year`], truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn whole_year(year: f64) -> i32 {
    year as i32
}

/// Maps a month key to its English name.
///
/// Keys are matched as text: only `"1"` through `"12"` resolve, so `"07"`
/// and `"7.0"` are out of range even though they are numeric.
#[must_use]
pub fn month_name(raw: &str) -> Resolved<&'static str> {
    text(raw).and_then(|value| {
        let Ok(number) = value.parse::<u32>() else {
            return Resolved::Unknown(UnknownReason::NotNumeric);
        };
        if number.to_string() != value {
            return Resolved::Unknown(UnknownReason::OutOfRange);
        }

        let month = u8::try_from(number)
            .ok()
            .and_then(|n| Month::try_from(n).ok());
        Resolved::from_option(month.map(|m| m.name()), UnknownReason::OutOfRange)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(text("   "), Resolved::Unknown(UnknownReason::Missing));
        assert_eq!(text(" disk "), Resolved::Known("disk"));
    }

    #[test]
    fn coerces_numeric_years() {
        assert_eq!(year("2010"), Resolved::Known(2010.0));
        assert_eq!(year("2010.0"), Resolved::Known(2010.0));
        assert_eq!(year(" 1999 "), Resolved::Known(1999.0));
        assert_eq!(year("2010.5"), Resolved::Known(2010.5));
    }

    #[test]
    fn degrades_bad_years_with_reason() {
        assert_eq!(year(""), Resolved::Unknown(UnknownReason::Missing));
        assert_eq!(year("abc"), Resolved::Unknown(UnknownReason::NotNumeric));
        assert_eq!(year("nan"), Resolved::Unknown(UnknownReason::NotNumeric));
        assert_eq!(year("inf"), Resolved::Unknown(UnknownReason::OutOfRange));
        assert_eq!(year("1e12"), Resolved::Unknown(UnknownReason::OutOfRange));
    }

    #[test]
    fn whole_year_truncates_toward_zero() {
        assert_eq!(whole_year(2010.5), 2010);
        assert_eq!(whole_year(2010.0), 2010);
        assert_eq!(whole_year(-44.5), -44);
    }

    #[test]
    fn maps_month_keys() {
        assert_eq!(month_name("7"), Resolved::Known("July"));
        assert_eq!(month_name("1"), Resolved::Known("January"));
        assert_eq!(month_name("12"), Resolved::Known("December"));
    }

    #[test]
    fn degrades_bad_months_with_reason() {
        assert_eq!(month_name(""), Resolved::Unknown(UnknownReason::Missing));
        assert_eq!(month_name("13"), Resolved::Unknown(UnknownReason::OutOfRange));
        assert_eq!(month_name("0"), Resolved::Unknown(UnknownReason::OutOfRange));
        assert_eq!(month_name("07"), Resolved::Unknown(UnknownReason::OutOfRange));
        assert_eq!(month_name("July"), Resolved::Unknown(UnknownReason::NotNumeric));
    }
}

//! Dashboard statistics over the full record set.

use std::cmp::Ordering;

use ufo_map_analytics_models::{RankedCount, StatisticsSummary, TOP_N};
use ufo_map_sighting_models::{Resolved, SightingRecord, UnknownReason, coerce};

use crate::ranking::FrequencyTally;

/// Computes the [`StatisticsSummary`] for `records`.
///
/// Year analysis only looks at records with a non-empty year that reads as
/// a number; the others still count toward the totals. Month analysis
/// ranks the raw month keys and names the winner, so a winning key outside
/// `"1"`..`"12"` makes the peak month unknown.
#[must_use]
pub fn compute_summary(records: &[SightingRecord]) -> StatisticsSummary {
    let shapes: FrequencyTally<&str> = records.iter().map(|r| r.shape.as_str()).collect();
    let cities: FrequencyTally<&str> = records.iter().map(|r| r.city.as_str()).collect();

    let top_shapes = owned(shapes.top(TOP_N));
    let top_cities = owned(cities.top(TOP_N));
    let most_common_shape = Resolved::from_option(
        top_shapes.first().map(|r| r.label.clone()),
        UnknownReason::NoData,
    );

    let years = numeric_years(records);
    let year_tally: FrequencyTally<YearKey> = years.iter().copied().map(YearKey).collect();
    let earliest_year = years.iter().copied().min_by(f64::total_cmp);
    let latest_year = years.iter().copied().max_by(f64::total_cmp);

    let months: FrequencyTally<&str> = records
        .iter()
        .map(|r| r.month.as_str())
        .filter(|month| !month.is_empty())
        .collect();
    let peak_month = Resolved::from_option(months.most_common().copied(), UnknownReason::NoData)
        .and_then(coerce::month_name);

    StatisticsSummary {
        total_sightings: records.len() as u64,
        unique_cities: cities.distinct() as u64,
        unique_shapes: shapes.distinct() as u64,
        most_common_shape,
        peak_year: whole(year_tally.most_common().map(|key| key.0)),
        peak_month,
        earliest_year: whole(earliest_year),
        latest_year: whole(latest_year),
        top_shapes,
        top_cities,
        year_counts: year_tally
            .top(TOP_N)
            .into_iter()
            .map(|r| RankedCount {
                label: r.label.0,
                count: r.count,
            })
            .collect(),
    }
}

/// Tally key for coerced years. `2010.5` and `2010` are separate keys.
#[derive(Debug, Clone, Copy)]
struct YearKey(f64);

impl PartialEq for YearKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for YearKey {}

impl PartialOrd for YearKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for YearKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn whole(year: Option<f64>) -> Resolved<i32> {
    Resolved::from_option(year.map(coerce::whole_year), UnknownReason::NoData)
}

/// Years of every record whose year cell is non-empty and numeric, in
/// record order.
fn numeric_years(records: &[SightingRecord]) -> Vec<f64> {
    let mut rejected: u64 = 0;

    let years: Vec<f64> = records
        .iter()
        .filter(|r| !r.year.is_empty())
        .filter_map(|r| match coerce::year(&r.year) {
            Resolved::Known(year) => Some(year),
            Resolved::Unknown(reason) => {
                log::debug!("Excluding year '{}' from year analysis: {reason}", r.year);
                rejected += 1;
                None
            }
        })
        .collect();

    if rejected > 0 {
        log::info!("{rejected} non-numeric year value(s) excluded from year analysis");
    }

    years
}

fn owned(ranked: Vec<RankedCount<&str>>) -> Vec<RankedCount> {
    ranked
        .into_iter()
        .map(|r| RankedCount {
            label: r.label.to_string(),
            count: r.count,
        })
        .collect()
}

//! Statistics dashboard panel.
//!
//! The panel is rendered server-side from a [`StatisticsSummary`]; the
//! embedded script only animates the progress bars and handles the
//! collapse toggle.

use std::fmt::{Display, Write as _};

use ufo_map_analytics_models::{RankedCount, StatisticsSummary};

use crate::popup::escape_html;

/// Formats a count with comma thousands separators (`12345` -> `"12,345"`).
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

/// Progress bar width in percent: `count / max * 100`, or zero when the
/// list has no counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_width(count: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    count as f64 / max as f64 * 100.0
}

/// Renders the dashboard panel.
#[must_use]
pub fn dashboard_html(summary: &StatisticsSummary) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(
        "<div class=\"stats-dashboard\" id=\"ufoStatsDashboard\">\
         <div class=\"stats-header\">\
         <h3 class=\"stats-title\">\u{1F6F8} UFO Intel</h3>\
         <button class=\"toggle-btn\" onclick=\"toggleStatsPanel()\" \
         title=\"Hide Statistics\">\u{2715}</button>\
         </div>\
         <div class=\"stats-content\">",
    );

    html.push_str("<div class=\"stat-section\"><div class=\"key-stats\">");
    for (value, label) in [
        (format_thousands(summary.total_sightings), "Total Sightings"),
        (summary.unique_cities.to_string(), "Cities"),
        (summary.unique_shapes.to_string(), "Shape Types"),
        (summary.year_range().to_string(), "Year Range"),
    ] {
        write!(
            html,
            "<div class=\"stat-card\"><span class=\"stat-number\">{}</span>\
             <div class=\"stat-label\">{label}</div></div>",
            escape_html(&value)
        )
        .unwrap();
    }
    html.push_str("</div></div>");

    html.push_str(
        "<div class=\"stat-section\">\
         <h4 class=\"section-title\">\u{1F525} Peak Activity</h4>",
    );
    for (value, label) in [
        (summary.peak_year.to_string(), "Most Active Year"),
        (summary.peak_month.to_string(), "Most Active Month"),
    ] {
        write!(
            html,
            "<div class=\"highlight-stat\"><span class=\"highlight-value\">{}</span>\
             <div class=\"highlight-label\">{label}</div></div>",
            escape_html(&value)
        )
        .unwrap();
    }
    html.push_str("</div>");

    ranked_section(&mut html, "\u{1F441}\u{FE0F} Common Shapes", &summary.top_shapes);
    ranked_section(&mut html, "\u{1F3D9}\u{FE0F} Hotspot Cities", &summary.top_cities);

    html.push_str("</div></div>");
    html
}

/// Appends a titled top-N list with one progress bar per entry, scaled
/// against the largest count in the list.
fn ranked_section<T: Display>(html: &mut String, title: &str, ranked: &[RankedCount<T>]) {
    let max = ranked.iter().map(|r| r.count).max().unwrap_or(0);

    write!(
        html,
        "<div class=\"stat-section\"><h4 class=\"section-title\">{title}</h4>\
         <ul class=\"top-list\">"
    )
    .unwrap();
    for entry in ranked {
        write!(
            html,
            "<li class=\"top-item\"><span class=\"item-name\">{}</span>\
             <span class=\"item-count\">{}</span>\
             <div class=\"progress-bar\"><div class=\"progress-fill\" \
             data-width=\"{:.1}\"></div></div></li>",
            escape_html(&entry.label.to_string()),
            entry.count,
            bar_width(entry.count, max)
        )
        .unwrap();
    }
    html.push_str("</ul></div>");
}

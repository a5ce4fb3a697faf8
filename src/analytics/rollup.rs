use chrono::NaiveDate;

use crate::models::{AnalyticsEntry, PageViews, StatsRollup};

const WEEK_DAYS: usize = 7;

/// Reduces a chronologically ascending daily series into the stats rollup.
///
/// "Today" is the entry whose date equals `today`; when the provider has no
/// row for it yet, today's counts are zero. The week is the last seven entries
/// and the month is the whole fetched window. Week and month deltas are not
/// derived from history and are always 0.
pub fn compute_rollup(entries: &[AnalyticsEntry], today: NaiveDate) -> StatsRollup {
    let today_key = today.format("%Y-%m-%d").to_string();
    let today_entry = entries.iter().rev().find(|e| e.date_key() == today_key);

    let visitors_today = today_entry.map(AnalyticsEntry::visitors).unwrap_or(0);
    let page_views_today = today_entry.map(AnalyticsEntry::page_views).unwrap_or(0);

    let week = &entries[entries.len().saturating_sub(WEEK_DAYS)..];

    let week_trend: Vec<u64> = week.iter().map(AnalyticsEntry::visitors).collect();
    let week_pageview_trend: Vec<u64> = week.iter().map(AnalyticsEntry::page_views).collect();
    let month_trend: Vec<u64> = entries.iter().map(AnalyticsEntry::visitors).collect();
    let month_pageview_trend: Vec<u64> = entries.iter().map(AnalyticsEntry::page_views).collect();

    StatsRollup {
        today: visitors_today,
        week: week_trend.iter().sum(),
        month: month_trend.iter().sum(),
        page_views: PageViews {
            today: page_views_today,
            week: week_pageview_trend.iter().sum(),
            month: month_pageview_trend.iter().sum(),
        },
        today_delta: today_delta(visitors_today, week),
        week_delta: 0,
        month_delta: 0,
        today_trend: vec![visitors_today],
        week_trend: at_least_one_point(week_trend),
        month_trend: at_least_one_point(month_trend),
        today_pageview_trend: vec![page_views_today],
        week_pageview_trend: at_least_one_point(week_pageview_trend),
        month_pageview_trend: at_least_one_point(month_pageview_trend),
    }
}

/// Change of today's visitors against the second-to-last week entry.
fn today_delta(visitors_today: u64, week: &[AnalyticsEntry]) -> i64 {
    if week.len() < 2 {
        return 0;
    }
    match week[week.len() - 2].visitors() {
        0 => 0,
        previous => percent_change(visitors_today, previous),
    }
}

/// Percent change rounded half toward positive infinity.
fn percent_change(current: u64, previous: u64) -> i64 {
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (change + 0.5).floor() as i64
}

fn at_least_one_point(series: Vec<u64>) -> Vec<u64> {
    if series.is_empty() {
        vec![0]
    } else {
        series
    }
}

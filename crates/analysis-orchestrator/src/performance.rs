use analysis_core::{Bar, PerformanceEntry, PerformanceReport, PriceSeries};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// Trailing returns against the latest close. Windows reaching back past
/// the start of the series are omitted rather than clamped.
pub fn trailing_performance(series: &PriceSeries) -> PerformanceReport {
    let bars = series.bars();
    let latest = series.last();
    let current = latest.close;

    let mut report = PerformanceReport::default();

    if bars.len() >= 2 {
        report.one_day = entry(current, Some(bars[bars.len() - 2].close));
    }
    report.five_days = entry(current, close_near(bars, latest.timestamp - Duration::days(5)));
    report.one_month = entry(current, close_near(bars, latest.timestamp - Duration::days(30)));
    report.six_months = entry(current, close_near(bars, latest.timestamp - Duration::days(180)));
    report.year_to_date = entry(current, ytd_base(bars, latest.timestamp));
    report.one_year = entry(current, close_near(bars, latest.timestamp - Duration::days(365)));
    report.five_years = entry(current, close_near(bars, latest.timestamp - Duration::days(1825)));

    report
}

fn entry(current: f64, base: Option<f64>) -> Option<PerformanceEntry> {
    let base = base?;
    Some(PerformanceEntry {
        base,
        change: current / base - 1.0,
    })
}

/// Close of the bar dated nearest to the target, None when the target
/// predates the series entirely
fn close_near(bars: &[Bar], target: DateTime<Utc>) -> Option<f64> {
    if target < bars.first()?.timestamp {
        return None;
    }
    bars.iter()
        .min_by_key(|bar| (bar.timestamp - target).num_seconds().abs())
        .map(|bar| bar.close)
}

/// First close on or after January 1 of the latest bar's year
fn ytd_base(bars: &[Bar], latest: DateTime<Utc>) -> Option<f64> {
    let jan_first = Utc.with_ymd_and_hms(latest.year(), 1, 1, 0, 0, 0).single()?;
    bars.iter()
        .find(|bar| bar.timestamp >= jan_first)
        .map(|bar| bar.close)
}

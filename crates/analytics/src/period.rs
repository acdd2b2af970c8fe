use chrono::{DateTime, Datelike, NaiveDate, Utc};
use skyops_common::error::{SkyopsError, SkyopsResult};

/// Chart labels for the twelve calendar months, index 0 = January.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `YYYY-MM` bucket key for a date. Lexicographic order on these keys
/// equals chronological order.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Zero-based calendar month index (0 = January) of a UTC timestamp.
pub fn month_index(ts: DateTime<Utc>) -> usize {
    ts.month0() as usize
}

/// Half-open UTC bounds of a calendar year, `[Jan 1, Jan 1 of year+1)`.
/// The exclusive upper bound keeps sub-second timestamps in the last
/// second of December inside the year.
pub fn year_bounds(year: i32) -> SkyopsResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SkyopsError::Validation(format!("invalid year: {year}")))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SkyopsError::Validation(format!("invalid year: {year}")))?;

    Ok((start.and_utc(), end.and_utc()))
}

/// Scale a 0..1 score to a percentage with one decimal place, rounding
/// half away from zero: `round(score * 1000) / 10`.
pub fn percent_1dp(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

/// Round to two decimal places, half away from zero.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

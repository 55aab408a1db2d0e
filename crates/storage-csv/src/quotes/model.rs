//! File model for price history rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Columns the price file must carry. Others are ignored.
pub const PRICE_REQUIRED_COLUMNS: [&str; 5] = ["Datetime", "Close", "Volume", "Ticker", "variacao"];

/// Parses the `Datetime` column.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (optionally with fractional
/// seconds or a UTC offset) and RFC 3339. Only the calendar date is kept.
pub fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z")
        .ok()
        .map(|dt| dt.date_naive())
}

/// True for cells pandas writes for a missing change value.
pub(crate) fn is_missing(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty() || s.eq_ignore_ascii_case("nan")
}

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};

/// Convert a month to its corresponding quarter (1-4).
///
/// Returns `None` for any value outside of the valid range (1-12).
///
/// # Examples
///
/// ```
/// assert_eq!(month_to_quarter(5), Some(2));
/// ```
pub fn month_to_quarter(month: u32) -> Option<u32> {
    match month {
        1..=12 => Some((month - 1) / 3 + 1),
        _ => None,
    }
}

/// 當月最後一天
pub fn month_end(date: NaiveDate) -> NaiveDate {
    last_day_of_month(date.year(), date.month()).unwrap_or(date)
}

/// 當季最後一天，季別採日曆季 (3/31、6/30、9/30、12/31)
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    month_to_quarter(date.month())
        .and_then(|quarter| last_day_of_month(date.year(), quarter * 3))
        .unwrap_or(date)
}

/// 當年最後一天
pub fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|why| anyhow!("Failed to parse '{}' as date because {:?}", s, why))
}

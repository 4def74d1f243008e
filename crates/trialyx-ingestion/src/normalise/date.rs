//! Best-effort parsing of registry date strings.
//!
//! Registry exports mix "March 20, 2020", "2020-03-20", "03/20/2020" and
//! partial dates such as "April 2020". Partial dates resolve to the first
//! day of the period.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use trialyx_common::DateParseError;

/// Full calendar date layouts, tried in order. Numeric layouts are month-first.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Month-and-year layouts; parsed with an explicit day 1 prepended.
const MONTH_FORMATS: &[&str] = &["%B %Y", "%b %Y", "%B, %Y", "%Y-%m", "%m/%Y"];

/// Parse a free-text registry date.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(DateParseError::new(text));
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Ok(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    let with_day = format!("1 {s}");
    if let Some(date) = MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, &format!("%d {fmt}")).ok())
    {
        return Ok(date);
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(date) = s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        {
            return Ok(date);
        }
    }

    Err(DateParseError::new(text))
}

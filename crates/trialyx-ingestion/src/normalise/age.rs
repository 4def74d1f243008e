//! Eligibility age extraction.
//!
//! Registry age descriptions come in four shapes:
//! - "18 Years and older"    → (18, 99)
//! - "6 Months and older"    → (0.5, 99)
//! - "up to 17 Years"        → (0, 17)
//! - "18 Years to 65 Years"  → (18, 65)
//!
//! Anything else, including a recognised shape whose number does not
//! parse, is no data.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::AgeRange;

/// Upper bound used for open-ended ranges ("... and older").
pub const OPEN_UPPER_AGE: f64 = 99.0;

/// Precision kept when converting months to years.
const MONTH_DECIMALS: i32 = 3;

lazy_static! {
    static ref YEARS_AND_OLDER: Regex = Regex::new(r"(\d+)\sYears\sand\solder").unwrap();
    static ref MONTHS_AND_OLDER: Regex = Regex::new(r"(\d+)\sMonths\sand\solder").unwrap();
    static ref UP_TO_YEARS: Regex = Regex::new(r"up\sto\s(\d+)\sYears").unwrap();
    static ref YEARS_TO_YEARS: Regex = Regex::new(r"(\d+)\sYears\sto\s(\d+)\sYears").unwrap();
}

/// Extract the eligibility age range from a free-text description.
pub fn extract_age_range(text: &str) -> Option<AgeRange> {
    if text.contains("Years and older") {
        let caps = YEARS_AND_OLDER.captures(text)?;
        let years = parse_number(caps.get(1)?.as_str())?;
        Some(AgeRange::new(years, OPEN_UPPER_AGE))
    } else if text.contains("Months and older") {
        let caps = MONTHS_AND_OLDER.captures(text)?;
        let months = parse_number(caps.get(1)?.as_str())?;
        Some(AgeRange::new(round_to(months / 12.0, MONTH_DECIMALS), OPEN_UPPER_AGE))
    } else if text.contains("up to ") {
        let caps = UP_TO_YEARS.captures(text)?;
        let years = parse_number(caps.get(1)?.as_str())?;
        Some(AgeRange::new(0.0, years))
    } else if text.contains("Years to") {
        let caps = YEARS_TO_YEARS.captures(text)?;
        let lower = parse_number(caps.get(1)?.as_str())?;
        let upper = parse_number(caps.get(2)?.as_str())?;
        Some(AgeRange::new(lower, upper))
    } else {
        None
    }
}

fn parse_number(digits: &str) -> Option<f64> {
    digits.parse::<u32>().ok().map(f64::from)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_and_older() {
        assert_eq!(extract_age_range("65 Years and older"), Some(AgeRange::new(65.0, 99.0)));
        assert_eq!(
            extract_age_range("18 Years and older   (Adult, Older Adult)"),
            Some(AgeRange::new(18.0, 99.0))
        );
    }

    #[test]
    fn test_months_and_older_rounds_to_three_places() {
        assert_eq!(extract_age_range("6 Months and older"), Some(AgeRange::new(0.5, 99.0)));
        let r = extract_age_range("7 Months and older").unwrap();
        assert!((r.min - 0.583).abs() < 1e-12, "got {}", r.min);
    }

    #[test]
    fn test_up_to_years_is_numeric() {
        assert_eq!(extract_age_range("up to 17 Years   (Child)"), Some(AgeRange::new(0.0, 17.0)));
    }

    #[test]
    fn test_up_to_without_number_is_no_data() {
        assert_eq!(extract_age_range("up to 6 Months"), None);
    }

    #[test]
    fn test_years_to_years() {
        assert_eq!(extract_age_range("18 Years to 45 Years"), Some(AgeRange::new(18.0, 45.0)));
        assert_eq!(
            extract_age_range("18 Years to 80 Years   (Adult, Older Adult)"),
            Some(AgeRange::new(18.0, 80.0))
        );
    }

    #[test]
    fn test_unrecognised_shapes() {
        assert_eq!(extract_age_range("Adult"), None);
        assert_eq!(extract_age_range(""), None);
        // Marker present but the number is missing
        assert_eq!(extract_age_range("Years and older"), None);
        assert_eq!(extract_age_range("6 Months to 12 Years"), None);
    }

    #[test]
    fn test_shapes_are_checked_in_order() {
        // "Years and older" wins over the range shape
        assert_eq!(
            extract_age_range("18 Years and older, 18 Years to 30 Years"),
            Some(AgeRange::new(18.0, 99.0))
        );
    }

    #[test]
    fn test_number_overflow_is_no_data() {
        assert_eq!(extract_age_range("99999999999 Years and older"), None);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::dates::{is_present_marker, parse_calendar_date};

/// Average month length used to turn day spans into months.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

/// A span between two dates, in whole months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    pub total_months: u32,
    pub years: u32,
    /// Months left over after whole years.
    pub months: u32,
    pub human_readable: String,
}

impl Duration {
    pub fn from_months(total_months: u32) -> Self {
        let years = total_months / 12;
        let months = total_months % 12;
        Self {
            total_months,
            years,
            months,
            human_readable: format_duration(years, months),
        }
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s")
    } else {
        format!("{count} {unit}")
    }
}

/// `"2 years, 6 months"`, `"1 year"`, `"3 months"` or `"Less than a month"`.
pub fn format_duration(years: u32, months: u32) -> String {
    match (years, months) {
        (0, 0) => "Less than a month".to_string(),
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{}, {}", plural(y, "year"), plural(m, "month")),
    }
}

/// Duration from `start` to `end`, where a missing, empty or `"present"` end
/// means `today`. `None` when the start is missing or either date is unparseable.
///
/// The day span is divided by [`AVG_DAYS_PER_MONTH`] and floored, so a span a
/// few days short of a full year never rounds up into an extra year.
pub fn calculate_duration(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Option<Duration> {
    let start = parse_calendar_date(start?)?;
    let end = match end.map(str::trim) {
        None | Some("") => today,
        Some(e) if is_present_marker(e) => today,
        Some(e) => parse_calendar_date(e)?,
    };

    let days = (end - start).num_days().unsigned_abs() as f64;
    let total_months = (days / AVG_DAYS_PER_MONTH).floor() as u32;
    Some(Duration::from_months(total_months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_format_duration_table() {
        assert_eq!(format_duration(2, 6), "2 years, 6 months");
        assert_eq!(format_duration(0, 3), "3 months");
        assert_eq!(format_duration(1, 0), "1 year");
        assert_eq!(format_duration(0, 0), "Less than a month");
        assert_eq!(format_duration(1, 1), "1 year, 1 month");
    }

    #[test]
    fn test_three_year_span_just_short_counts_two_years() {
        let d = calculate_duration(Some("2020-01-01"), Some("2022-12-31"), today()).unwrap();
        assert_eq!(d.years, 2);
        assert_eq!(d.months, 11);
        assert_eq!(d.total_months, 35);
        assert_eq!(d.human_readable, "2 years, 11 months");
    }

    #[test]
    fn test_invalid_or_missing_start_is_none() {
        assert!(calculate_duration(Some("invalid"), Some("2022-01-01"), today()).is_none());
        assert!(calculate_duration(None, Some("2022-01-01"), today()).is_none());
        assert!(calculate_duration(Some(""), None, today()).is_none());
    }

    #[test]
    fn test_invalid_end_is_none() {
        assert!(calculate_duration(Some("2020-01"), Some("someday"), today()).is_none());
    }

    #[test]
    fn test_open_end_uses_today() {
        let open = calculate_duration(Some("2022-06-01"), None, today()).unwrap();
        let present = calculate_duration(Some("2022-06-01"), Some("Present"), today()).unwrap();
        assert_eq!(open, present);
        // 731 days
        assert_eq!(open.total_months, 24);
        assert_eq!(open.human_readable, "2 years");
    }

    #[test]
    fn test_reversed_dates_use_absolute_span() {
        let d = calculate_duration(Some("2021-01-01"), Some("2020-01-01"), today()).unwrap();
        assert_eq!(d.total_months, 12);
    }

    #[test]
    fn test_same_day_is_less_than_a_month() {
        let d = calculate_duration(Some("2021-05-05"), Some("2021-05-05"), today()).unwrap();
        assert_eq!(d.human_readable, "Less than a month");
    }

    #[test]
    fn test_year_only_dates() {
        let d = calculate_duration(Some("2018"), Some("2020"), today()).unwrap();
        assert_eq!(d.years, 1);
    }
}

//! Partial calendar dates as written in resumes: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate};

/// How much of a date the author supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub date: NaiveDate,
    pub precision: Precision,
}

fn digits(s: &str, len: usize) -> Option<u32> {
    if s.len() == len && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Strict shape check: exactly one of the three partial forms, and a real
/// calendar day. Missing month/day components default to the first.
pub fn parse_partial_date(input: &str) -> Option<PartialDate> {
    let mut parts = input.split('-');
    let year = digits(parts.next()?, 4)? as i32;
    let (month, month_given) = match parts.next() {
        Some(m) => (digits(m, 2)?, true),
        None => (1, false),
    };
    let (day, day_given) = match parts.next() {
        Some(d) if month_given => (digits(d, 2)?, true),
        Some(_) => return None,
        None => (1, false),
    };
    if parts.next().is_some() {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let precision = match (month_given, day_given) {
        (_, true) => Precision::Day,
        (true, false) => Precision::Month,
        _ => Precision::Year,
    };
    Some(PartialDate { date, precision })
}

/// Used as the `date` format checker of the schema.
pub fn is_flexible_date(input: &str) -> bool {
    parse_partial_date(input).is_some()
}

/// Lenient parse for derived fields: accepts the partial forms, plus full
/// RFC 3339 timestamps, which some exporters emit.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    parse_partial_date(input)
        .map(|p| p.date)
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

/// True for end dates that mean "still ongoing".
pub fn is_present_marker(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("present")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_year_month_and_day_forms() {
        assert_eq!(parse_partial_date("2020").unwrap().precision, Precision::Year);
        assert_eq!(parse_partial_date("2020-12").unwrap().precision, Precision::Month);
        assert_eq!(parse_partial_date("2020-12-31").unwrap().precision, Precision::Day);
    }

    #[test]
    fn test_year_only_defaults_to_january_first() {
        let d = parse_partial_date("2019").unwrap().date;
        assert_eq!(d, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        for bad in ["", "20", "2020-1", "2020-13", "2020-02-30", "2020/01/01", "abc", "2020-01-01-01"] {
            assert!(!is_flexible_date(bad), "accepted {bad}");
        }
    }

    #[test]
    fn test_lenient_parse_accepts_timestamps() {
        let d = parse_calendar_date("2021-03-04T10:00:00Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert!(parse_calendar_date("invalid").is_none());
        assert!(parse_calendar_date("  ").is_none());
    }

    #[test]
    fn test_present_marker_is_case_insensitive() {
        assert!(is_present_marker("Present"));
        assert!(is_present_marker("present "));
        assert!(!is_present_marker("2020"));
    }
}

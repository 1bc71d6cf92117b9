use crate::models::dates::{is_present_marker, parse_calendar_date};

pub const RANGE_SEPARATOR: &str = " - ";
pub const PRESENT_LABEL: &str = "Present";

/// `"Jan 2020"`. Unparseable input is shown as written.
pub fn format_date(input: &str) -> String {
    match parse_calendar_date(input) {
        Some(date) => date.format("%b %Y").to_string(),
        None => input.trim().to_string(),
    }
}

/// `"Jan 2020 - Mar 2022"` or `"Jan 2020 - Present"`. Empty when there is no start.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = match start.map(str::trim) {
        None | Some("") => return String::new(),
        Some(s) => format_date(s),
    };
    let end = match end.map(str::trim) {
        None | Some("") => PRESENT_LABEL.to_string(),
        Some(e) if is_present_marker(e) => PRESENT_LABEL.to_string(),
        Some(e) => format_date(e),
    };
    format!("{start}{RANGE_SEPARATOR}{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_range() {
        assert_eq!(
            format_date_range(Some("2020-01-15"), Some("2022-03")),
            "Jan 2020 - Mar 2022"
        );
    }

    #[test]
    fn test_open_range_shows_present() {
        assert_eq!(format_date_range(Some("2021-07"), None), "Jul 2021 - Present");
        assert_eq!(
            format_date_range(Some("2021-07"), Some("present")),
            "Jul 2021 - Present"
        );
        assert_eq!(format_date_range(Some("2021-07"), Some("")), "Jul 2021 - Present");
    }

    #[test]
    fn test_missing_start_renders_nothing() {
        assert_eq!(format_date_range(None, Some("2020")), "");
        assert_eq!(format_date_range(Some(" "), Some("2020")), "");
    }

    #[test]
    fn test_year_only_renders_january() {
        assert_eq!(format_date("2019"), "Jan 2019");
    }

    #[test]
    fn test_unparseable_date_is_shown_verbatim() {
        assert_eq!(format_date("Summer 2019"), "Summer 2019");
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Wire format for calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Parses a `YYYY-MM-DD` boundary value into a date-only value.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let tz = chrono_tz::UTC;
        let result = now_in_timezone(&tz);
        assert_eq!(result.timezone(), tz);
    }

    #[test]
    fn today_local_matches_utc_date_for_utc() {
        let tz = chrono_tz::UTC;
        let before = Utc::now().date_naive();
        let today = today_local(&tz);
        let after = Utc::now().date_naive();
        assert!(today == before || today == after);
    }

    #[test]
    fn parse_iso_date_accepts_padded_input() {
        assert_eq!(
            parse_iso_date(" 2024-12-02 "),
            NaiveDate::from_ymd_opt(2024, 12, 2)
        );
        assert_eq!(parse_iso_date("02/12/2024"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
    }

    #[test]
    fn format_iso_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(format_iso_date(date), "2025-01-09");
    }
}

//! Wire formats for dates and times stored in the durable slot.
//!
//! Event dates are written the way a browser writes a `Date`: local midnight
//! of the calendar day as an RFC 3339 UTC timestamp with milliseconds
//! (`2024-03-15T05:00:00.000Z` in UTC-5). Reading is lenient and accepts any
//! RFC 3339 offset, naive date-times and bare `YYYY-MM-DD` dates.

use chrono::{
    DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

use crate::error::{DaybookError, DaybookResult};

const TIME_FORMAT: &str = "%H:%M";

/// Parse a stored or user-supplied date into a calendar day.
///
/// Offset-bearing timestamps are converted to the local calendar day, which
/// is the day a user saw when the event was created.
pub fn parse_calendar_date(s: &str) -> DaybookResult<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DaybookError::InvalidDate(s.to_string()))
}

/// Render a calendar day as local midnight in RFC 3339 UTC form.
pub fn format_calendar_date(date: NaiveDate) -> String {
    let midnight = date.and_time(NaiveTime::MIN);

    // Some zones skip midnight on DST changes; fall back to the first valid hour.
    let instant: DateTime<Utc> = Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());

    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a time of day given as `HH:MM` (or `HH:MM:SS`).
pub fn parse_clock_time(s: &str) -> DaybookResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| DaybookError::InvalidTime(s.to_string()))
}

pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a `YYYY-MM` month into the first day of that month.
pub fn parse_month(s: &str) -> DaybookResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| DaybookError::InvalidMonth(s.to_string()))
}

/// Serde adapter for `NaiveDate` fields stored as ISO-8601 date-times.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for `NaiveTime` fields stored as `HH:MM`.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_bare_date() {
        assert_eq!(parse_calendar_date("2024-03-15").unwrap(), date(2024, 3, 15));
    }

    #[test]
    fn test_parse_naive_datetime_keeps_day() {
        assert_eq!(
            parse_calendar_date("2024-03-15T23:30:00.000").unwrap(),
            date(2024, 3, 15)
        );
    }

    #[test]
    fn test_formatted_date_reads_back_as_same_day() {
        for d in [date(2024, 3, 15), date(2024, 1, 1), date(2023, 12, 31), date(2024, 2, 29)] {
            let formatted = format_calendar_date(d);
            assert!(formatted.ends_with('Z'), "{}", formatted);
            assert_eq!(parse_calendar_date(&formatted).unwrap(), d);
        }
    }

    #[test]
    fn test_parse_rfc3339_uses_local_day() {
        let stamp = "2024-03-15T12:00:00.000Z";
        let expected = DateTime::parse_from_rfc3339(stamp)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_calendar_date(stamp).unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(matches!(
            parse_calendar_date("next tuesday"),
            Err(DaybookError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_clock_time_formats() {
        let t = parse_clock_time("09:05").unwrap();
        assert_eq!(format_clock_time(t), "09:05");
        assert_eq!(format_clock_time(parse_clock_time("17:45:30").unwrap()), "17:45");
        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), date(2024, 3, 1));
        assert!(matches!(parse_month("2024-13"), Err(DaybookError::InvalidMonth(_))));
    }
}

//! Date handling at the wire boundary.
//!
//! Backends emit timestamps as RFC 3339 strings (Go's `time.Time`), while a few
//! older endpoints send naive `YYYY-MM-DDTHH:MM:SS` values. Everything is
//! normalized to `DateTime<Utc>` on the way in and written back as RFC 3339 UTC.
//!
//! Canteen hours go the other way: the create endpoint only takes a time of day
//! (`HH:MM`) and stamps it onto the current date itself.

use chrono::{DateTime, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    // <input type="datetime-local">
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a wire timestamp into UTC.
///
/// Offsets are honoured; naive values are taken as UTC. Returns `None` when the
/// input matches none of the accepted layouts.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Parses `HH:MM` (seconds tolerated, then dropped).
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .and_then(|t| t.with_second(0))
}

pub fn format_time_of_day(t: &NaiveTime) -> String {
    t.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Formats a timestamp the way it is sent to the backends.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter: `#[serde(with = "campus_shared::date::rfc3339")]`.
pub mod rfc3339 {
    use super::{format_datetime, parse_datetime};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_datetime(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Same as the parent module for `Option<DateTime<Utc>>`; empty strings map to `None`.
    pub mod option {
        use super::super::{format_datetime, parse_datetime};
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_some(&format_datetime(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_datetime(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}

/// Serde adapter for `HH:MM` wall-clock times.
pub mod hh_mm {
    use super::{format_time_of_day, parse_time_of_day};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time_of_day(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw).ok_or_else(|| D::Error::custom(format!("invalid time of day: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offsets_are_normalized_to_utc() {
        let parsed = parse_datetime("2025-03-10T08:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap());
    }

    #[test]
    fn naive_values_are_taken_as_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 12, 30, 0).unwrap();
        assert_eq!(parse_datetime("2025-03-10T12:30:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-10 12:30:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-10T12:30"), Some(expected));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn formatted_value_parses_back_to_the_same_instant() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(250);
        let text = format_datetime(&dt);
        assert!(text.ends_with('Z'));
        assert_eq!(parse_datetime(&text), Some(dt));
    }

    #[test]
    fn time_of_day_is_hours_and_minutes() {
        let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(parse_time_of_day("07:30"), Some(t));
        assert_eq!(parse_time_of_day(" 07:30:45 "), Some(t));
        assert_eq!(format_time_of_day(&t), "07:30");
        assert_eq!(parse_time_of_day("7.30"), None);
        assert_eq!(parse_time_of_day("2025-02-03T07:30"), None);
    }
}

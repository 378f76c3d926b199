//! Timestamp encoding shared by the database and the wire format.
//!
//! Timestamps are written as RFC 3339 text in UTC. On the wire, a numeric
//! value is also accepted and read as seconds since the Unix epoch. The
//! database column always carries nine fraction digits so that text order
//! matches time order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

/// Formats a timestamp the way it is stored and transmitted.
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Formats a timestamp for the database column, with fixed-width nanoseconds.
pub fn format_stored(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Seconds(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => parse(&text).map_err(de::Error::custom),
        Raw::Seconds(seconds) => {
            let whole = seconds.floor();
            let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
            DateTime::from_timestamp(whole as i64, nanos)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", seconds)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_accepts_rfc3339_with_offset() {
        let w: Wrapper = serde_json::from_str(r#"{"at":"2024-03-01T10:30:00+01:00"}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_accepts_epoch_seconds() {
        let w: Wrapper = serde_json::from_str(r#"{"at":1709285400}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());

        let w: Wrapper = serde_json::from_str(r#"{"at":1709285400.5}"#).unwrap();
        assert_eq!(w.at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":"yesterday"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":true}"#).is_err());
    }

    #[test]
    fn test_stored_format_sorts_like_time() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let half = Utc.timestamp_opt(whole.timestamp(), 500_000_000).unwrap();

        assert_eq!(format_stored(&whole), "2024-01-01T00:00:00.000000000Z");
        assert!(format_stored(&whole) < format_stored(&half));
        assert_eq!(parse(&format_stored(&half)).unwrap(), half);
    }

    #[test]
    fn test_subsecond_precision_survives_formatting() {
        let at = Utc.timestamp_opt(1_709_285_400, 123_456_789).unwrap();
        assert_eq!(parse(&format(&at)).unwrap(), at);
    }
}

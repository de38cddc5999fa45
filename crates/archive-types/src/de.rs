//! Field deserializers that absorb schema drift between archive snapshots.
//!
//! Older snapshots store identifiers as JSON numbers and timestamps as unix
//! seconds. Everything is normalized to string ids and UTC datetimes.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Accepts `"123"` or `123`, yields `"123"`.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Ok(s),
        Scalar::Int(n) => Ok(n.to_string()),
        Scalar::UInt(n) => Ok(n.to_string()),
        Scalar::Float(f) => Err(D::Error::custom(format!("non-integer id: {}", f))),
    }
}

/// Accepts an RFC 3339 string or unix seconds (integer or fractional).
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", s, e))),
        Scalar::Int(secs) => from_unix(secs, 0),
        Scalar::UInt(secs) => Err(D::Error::custom(format!("timestamp out of range: {}", secs))),
        Scalar::Float(secs) => {
            let floor = secs.floor();
            let nanos = ((secs - floor) * 1e9).round() as u32;
            // Rounding can carry a whole second
            if nanos >= 1_000_000_000 {
                from_unix(floor as i64 + 1, 0)
            } else {
                from_unix(floor as i64, nanos)
            }
        }
    }
}

/// Treats `null` like a missing key: the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn from_unix<E: Error>(secs: i64, nanos: u32) -> Result<DateTime<Utc>, E> {
    Utc.timestamp_opt(secs, nanos)
        .single()
        .ok_or_else(|| E::custom(format!("timestamp out of range: {}", secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(deserialize_with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_numeric_id_and_unix_timestamp() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "at": 1700000000}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_string_id_and_rfc3339_timestamp() {
        let row: Row =
            serde_json::from_str(r#"{"id": "abc", "at": "2023-11-14T22:13:20+00:00"}"#).unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_fractional_timestamp() {
        let row: Row = serde_json::from_str(r#"{"id": "1", "at": 1700000000.5}"#).unwrap();
        assert_eq!(row.at.timestamp(), 1_700_000_000);
        assert_eq!(row.at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_negative_fractional_timestamp() {
        let row: Row = serde_json::from_str(r#"{"id": "1", "at": -1.5}"#).unwrap();
        assert_eq!(row.at.timestamp(), -2);
        assert_eq!(row.at.timestamp_subsec_millis(), 500);
        assert_eq!(row.at.timestamp_millis(), -1500);
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "null_as_default")]
            text: String,
        }

        let null: Body = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(null.text, "");
        let missing: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.text, "");
        let set: Body = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(set.text, "hi");
    }

    #[test]
    fn test_id_above_i64_range() {
        let row: Row = serde_json::from_str(r#"{"id": 18446744073709551615, "at": 0}"#).unwrap();
        assert_eq!(row.id, "18446744073709551615");
    }

    #[test]
    fn test_rejects_fractional_id() {
        let res: Result<Row, _> = serde_json::from_str(r#"{"id": 1.5, "at": 0}"#);
        assert!(res.is_err());
    }
}

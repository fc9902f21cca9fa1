use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::poll::error::PollError;

/// X coordinate of a chart point, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_secs(secs: f64) -> Self {
        Timestamp(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Naive date-times are read as UTC; the roaster logger omits the offset.
    pub fn parse(value: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(Self::from_millis(dt.timestamp_millis()));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| Self::from_millis(naive.and_utc().timestamp_millis()))
    }

    fn from_millis(millis: i64) -> Self {
        Self::from_secs(millis as f64 / 1000.0)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_secs())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(secs) => Ok(Timestamp::from_secs(secs)),
            Raw::Text(text) => Timestamp::parse(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("unrecognized timestamp: {text:?}"))
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataReading {
    pub timestamp: Timestamp,
    pub temp_fire: f64,
    pub temp_air: f64,
    pub temp_bean: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "message_type", rename_all = "lowercase")]
pub enum Record {
    Text { message: String },
    Data(DataReading),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    channel: Option<String>,
    data: Record,
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Decodes a `/message` response body.
///
/// `Ok(None)` means the server had nothing new. Elements that do not decode
/// as a record envelope are dropped; the rest keep their order.
pub fn decode_batch(body: &str) -> Result<Option<Vec<Record>>, PollError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(body)?;
    if is_falsy(&value) {
        return Ok(None);
    }

    let Value::Array(items) = value else {
        return Err(PollError::Shape("expected an array of records"));
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Envelope>(item) {
            Ok(envelope) => {
                if let Some(channel) = &envelope.channel {
                    debug!(index, channel = channel.as_str(), "Decoded record");
                }
                Some(envelope.data)
            }
            Err(err) => {
                debug!(index, %err, "Skipping undecodable record");
                None
            }
        })
        .collect();

    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falsy_bodies_mean_no_data() {
        for body in ["", "  \n", "null", "false", "0", "\"\""] {
            assert!(decode_batch(body).unwrap().is_none(), "body {body:?}");
        }
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(decode_batch("[]").unwrap(), Some(vec![]));
    }

    #[test]
    fn test_text_record() {
        let records = decode_batch(r#"[{"data":{"message_type":"text","message":"hello"}}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            records,
            vec![Record::Text {
                message: "hello".to_string()
            }]
        );
    }

    #[test]
    fn test_data_record() {
        let body = r#"[{"data":{"message_type":"data","timestamp":100,"temp_fire":500,"temp_air":25,"temp_bean":150}}]"#;
        let records = decode_batch(body).unwrap().unwrap();
        assert_eq!(
            records,
            vec![Record::Data(DataReading {
                timestamp: Timestamp::from_secs(100.0),
                temp_fire: 500.0,
                temp_air: 25.0,
                temp_bean: 150.0,
            })]
        );
    }

    #[test]
    fn test_logger_payload_with_channel_and_extra_fields() {
        let body = r#"[
            {"channel":"carmomaq10","data":{"message_type":"data","timestamp":"2019-05-02T14:03:11",
             "roast_time":42,"temp_fire":610,"temp_air":230,"temp_bean":180,"temp_goal":185,"servo_position":1.5}},
            {"channel":"carmomaq10","data":{"message_type":"text","timestamp":"2019-05-02T14:03:12","message":"done"}}
        ]"#;
        let records = decode_batch(body).unwrap().unwrap();
        assert_eq!(records.len(), 2);

        let Record::Data(reading) = &records[0] else {
            panic!("expected a data record, got {:?}", records[0]);
        };
        assert_eq!(reading.timestamp.as_secs(), 1556805791.0);
        assert_eq!(reading.temp_bean, 180.0);
        assert!(matches!(&records[1], Record::Text { message } if message == "done"));
    }

    #[test]
    fn test_unknown_and_malformed_records() {
        let body = r#"[
            {"data":{"message_type":"status","message":"ignored"}},
            {"data":{"message_type":"data","timestamp":1}},
            {"nope":true},
            42,
            {"data":{"message_type":"text","message":"kept"}}
        ]"#;
        let records = decode_batch(body).unwrap().unwrap();
        assert_eq!(
            records,
            vec![
                Record::Unknown,
                Record::Text {
                    message: "kept".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_incomplete_records_are_dropped_whole() {
        // A data record missing one reading plots nothing rather than a partial point set.
        let body = r#"[
            {"data":{"message_type":"data","timestamp":1,"temp_fire":1,"temp_air":2}},
            {"data":{"message_type":"text","message":42}}
        ]"#;
        assert_eq!(decode_batch(body).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_non_array_body_is_an_error() {
        assert!(matches!(decode_batch("{\"data\":1}"), Err(PollError::Shape(_))));
        assert!(matches!(decode_batch("<html>"), Err(PollError::Decode(_))));
    }

    #[test]
    fn test_timestamp_parse_and_order() {
        let a = Timestamp::parse("2019-05-02T14:03:11").unwrap();
        let b = Timestamp::parse("2019-05-02T14:03:11.500").unwrap();
        let c = Timestamp::parse("2019-05-02T14:03:12+00:00").unwrap();
        assert!(a < b && b < c);
        assert_eq!(b.as_secs(), 1556805791.5);
        assert!(Timestamp::parse("yesterday").is_none());
    }
}

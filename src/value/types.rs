//! Scalar input and coerced value types

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// A raw input value, before coercion.
///
/// Deserializes untagged: a JSON integer becomes `Int`, a JSON string
/// becomes `Text`. `Timestamp` carries input that arrives already typed,
/// e.g. from a caller that parsed its own wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer input, e.g. Unix epoch seconds
    Int(i64),
    /// Textual input
    Text(String),
    /// Already-typed timestamp input
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Returns the kind name for messages and traces
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Text(_) => "text",
            Scalar::Timestamp(_) => "timestamp",
        }
    }

    /// True when the scalar is the empty text value, which counts as absent
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Scalar::Text(text) if text.is_empty())
    }

    /// The textual representation used when coercing to text
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(int) => int.to_string(),
            Scalar::Text(text) => text.clone(),
            Scalar::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// The timestamp representation used when coercing to a timestamp.
    ///
    /// Integers are Unix epoch seconds; text goes through the permissive
    /// parser; already-typed timestamps pass through.
    pub fn to_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Int(secs) => timestamp::from_epoch(*secs),
            Scalar::Text(text) => timestamp::parse(text),
            Scalar::Timestamp(ts) => Some(*ts),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

impl From<i64> for Scalar {
    fn from(int: i64) -> Self {
        Scalar::Int(int)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(ts: DateTime<Utc>) -> Self {
        Scalar::Timestamp(ts)
    }
}

/// A coerced value stored in a parsed record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Coerced text, unchanged from its raw representation
    Text(String),
    /// Coerced calendar timestamp, always UTC
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Returns the type name for messages and traces
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    /// The text content, when the value is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Timestamp(_) => None,
        }
    }

    /// The timestamp, when the value is one
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Text(_) => None,
            Value::Timestamp(ts) => Some(*ts),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{}", text),
            Value::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_scalar_deserializes_untagged() {
        let scalar: Scalar = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(scalar, Scalar::Int(42));

        let scalar: Scalar = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(scalar, Scalar::Text("hello".to_string()));

        // Date-like strings stay text; coercion decides what they become
        let scalar: Scalar = serde_json::from_value(json!("2020-01-01")).unwrap();
        assert_eq!(scalar, Scalar::Text("2020-01-01".to_string()));
    }

    #[test]
    fn test_scalar_text_coercion() {
        assert_eq!(Scalar::from("x").to_text(), "x");
        assert_eq!(Scalar::from(42).to_text(), "42");

        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Scalar::from(ts).to_text(), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_scalar_timestamp_coercion() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(Scalar::from(1577836800).to_timestamp(), Some(expected));
        assert_eq!(Scalar::from("2020-01-01").to_timestamp(), Some(expected));
        assert_eq!(Scalar::from(expected).to_timestamp(), Some(expected));
        assert_eq!(Scalar::from("garbage").to_timestamp(), None);
    }

    #[test]
    fn test_empty_text_detection() {
        assert!(Scalar::from("").is_empty_text());
        assert!(!Scalar::from(" ").is_empty_text());
        assert!(!Scalar::from(0).is_empty_text());
    }

    #[test]
    fn test_value_accessors() {
        let text = Value::Text("abc".to_string());
        assert_eq!(text.as_text(), Some("abc"));
        assert_eq!(text.as_timestamp(), None);
        assert_eq!(text.type_name(), "text");

        let instant = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        let ts = Value::Timestamp(instant);
        assert_eq!(ts.as_text(), None);
        assert_eq!(ts.as_timestamp(), Some(instant));
        assert_eq!(ts.type_name(), "timestamp");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Text("abc".to_string()).to_string(), "abc");

        let instant = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::Timestamp(instant).to_string(), "2020-01-01T12:00:00Z");
    }
}

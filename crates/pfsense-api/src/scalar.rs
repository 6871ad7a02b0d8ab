// Flexible scalar for fields whose JSON type varies between string and number.
//
// The appliance serializes some attributes as `"1"` on one firmware and `1`
// on another. `StringOrInt` accepts either and stores the text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A JSON scalar normalized to its string form.
///
/// Deserializing never fails on a well-formed JSON value: strings keep their
/// text with any `"` characters removed, numbers and booleans keep their JSON
/// text, `null` becomes the empty string, and arrays/objects fall back to
/// their compact JSON text with quotes removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringOrInt(String);

impl StringOrInt {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().replace('"', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort integer readout. Returns `0` when the text is not an integer.
    pub fn to_int(&self) -> i64 {
        self.0.trim().parse().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StringOrInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StringOrInt {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StringOrInt {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<i64> for StringOrInt {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for StringOrInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Self::new(s),
            Value::Null => Self::default(),
            other => Self::new(other.to_string()),
        })
    }
}

impl Serialize for StringOrInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// Typed field values exchanged with path builders

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from field name to value, as supplied to `get_path` or returned by parsing
pub type FieldValues = BTreeMap<String, FieldValue>;

/// A single field value.
///
/// `Null` stands for an omitted optional field: it renders as an empty
/// segment and is what parsing yields for an empty optional capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Str(String),
    Int(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Generic stringification, used when a field has no converter
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Build a [`FieldValues`] map from `name => value` pairs.
///
/// ```
/// use andar::{field_values, FieldValue};
///
/// let values = field_values! { "a" => "x", "take" => 3i64 };
/// assert_eq!(values["take"], FieldValue::Int(3));
/// ```
#[macro_export]
macro_rules! field_values {
    () => {
        $crate::FieldValues::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::FieldValues::new();
        $(
            values.insert(::std::string::String::from($name), $crate::FieldValue::from($value));
        )+
        values
    }};
}

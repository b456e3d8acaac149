// Value codec: field value to path fragment and back

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

use super::field::Converter;
use super::registry::RegisteredField;
use super::value::FieldValue;
use crate::error::{PathError, Result};

impl RegisteredField {
    /// Convert a value into its path fragment and check it against the field pattern.
    ///
    /// `Null` on an optional field encodes to the empty string.
    pub fn encode(&self, name: &str, value: &FieldValue) -> Result<String> {
        if value.is_null() {
            if self.is_optional() {
                return Ok(String::new());
            }
            tracing::warn!(field = name, "null value supplied for required field");
            return Err(PathError::NullValue {
                field: name.to_string(),
            });
        }

        let encoded = match &self.conf().converter {
            Converter::Date(format) => match value {
                FieldValue::Date(date) => format_chrono(name, value, format, date.format(format))?,
                FieldValue::DateTime(dt) => {
                    format_chrono(name, value, format, dt.date().format(format))?
                }
                FieldValue::Str(s) => s.clone(),
                other => return Err(conversion_error(name, other, "expected a date")),
            },
            Converter::DateTime(format) => match value {
                FieldValue::DateTime(dt) => format_chrono(name, value, format, dt.format(format))?,
                FieldValue::Str(s) => s.clone(),
                other => return Err(conversion_error(name, other, "expected a datetime")),
            },
            Converter::Custom(converter) => converter
                .to_path(value)
                .map_err(|e| conversion_error(name, value, &format!("{:#}", e)))?,
            Converter::None => value.to_string(),
        };

        if !self.matches_exact(&encoded) {
            return Err(PathError::Validation {
                field: name.to_string(),
                value: encoded,
                pattern: self.pattern().to_string(),
            });
        }

        tracing::trace!(field = name, encoded = %encoded, "encoded field");
        Ok(encoded)
    }

    /// Convert a captured path fragment back into a typed value.
    ///
    /// An empty capture on an optional field decodes to `Null`.
    pub fn decode(&self, name: &str, raw: &str) -> Result<FieldValue> {
        if !self.matches_capture(raw) {
            return Err(PathError::FieldParse {
                field: name.to_string(),
                value: raw.to_string(),
                pattern: self.pattern().to_string(),
            });
        }

        if raw.is_empty() && self.is_optional() {
            return Ok(FieldValue::Null);
        }

        let decode_error = |reason: String| PathError::Decode {
            field: name.to_string(),
            value: raw.to_string(),
            reason,
        };

        let decoded = match &self.conf().converter {
            Converter::Date(format) => NaiveDate::parse_from_str(raw, format)
                .map(FieldValue::Date)
                .map_err(|e| decode_error(e.to_string()))?,
            Converter::DateTime(format) => NaiveDateTime::parse_from_str(raw, format)
                .map(FieldValue::DateTime)
                .map_err(|e| decode_error(e.to_string()))?,
            Converter::Custom(converter) => converter
                .from_path(raw)
                .map_err(|e| decode_error(format!("{:#}", e)))?,
            Converter::None => FieldValue::Str(raw.to_string()),
        };

        tracing::trace!(field = name, raw, "decoded field");
        Ok(decoded)
    }
}

/// Render a chrono delayed format without panicking on invalid format strings
fn format_chrono(
    name: &str,
    value: &FieldValue,
    format: &str,
    delayed: impl std::fmt::Display,
) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", delayed)
        .map_err(|_| conversion_error(name, value, &format!("invalid format '{}'", format)))?;
    Ok(out)
}

fn conversion_error(name: &str, value: &FieldValue, reason: &str) -> PathError {
    PathError::Conversion {
        field: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converter::{IntegerOp, UpperOp};
    use crate::domain::field::FieldConf;
    use crate::domain::patterns::SafePatterns;
    use crate::error::ErrorKind;

    fn field(conf: FieldConf) -> RegisteredField {
        RegisteredField::compile("f", conf).unwrap()
    }

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
    }

    #[test]
    fn test_encode_plain_value() {
        let f = field(FieldConf::default());
        assert_eq!(f.encode("f", &"my_data".into()).unwrap(), "my_data");
        assert_eq!(f.encode("f", &FieldValue::Int(12)).unwrap(), "12");
    }

    #[test]
    fn test_encode_validates_pattern() {
        let f = field(FieldConf::new(r"[a-z]+"));
        let err = f.encode("f", &"CSV".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Invalid field 'f' value: 'CSV'. It does not match pattern: '[a-z]+'"
        );
    }

    #[test]
    fn test_encode_null() {
        let optional = field(FieldConf::default().with_optional(true));
        assert_eq!(optional.encode("f", &FieldValue::Null).unwrap(), "");

        let required = field(FieldConf::default());
        let err = required.encode("f", &FieldValue::Null).unwrap_err();
        assert!(matches!(err, PathError::NullValue { .. }));
    }

    #[test]
    fn test_date_round_trip() {
        let f = field(FieldConf::new(r"\d{4}/\d{2}/\d{2}").with_date_format("%Y/%m/%d"));
        let date = sample_datetime().date();
        assert_eq!(f.encode("f", &date.into()).unwrap(), "2025/02/01");
        assert_eq!(f.encode("f", &sample_datetime().into()).unwrap(), "2025/02/01");
        assert_eq!(f.decode("f", "2025/02/01").unwrap(), FieldValue::Date(date));
    }

    #[test]
    fn test_datetime_round_trip() {
        let f = field(
            FieldConf::new(r"\d{4}-\d{2}-\d{2}_\d{6}").with_datetime_format("%Y-%m-%d_%H%M%S"),
        );
        let encoded = f.encode("f", &sample_datetime().into()).unwrap();
        assert_eq!(encoded, "2025-02-01_123456");
        assert_eq!(
            f.decode("f", &encoded).unwrap(),
            FieldValue::DateTime(sample_datetime())
        );
    }

    #[test]
    fn test_date_field_rejects_integer() {
        let f = field(FieldConf::new(r"\d+").with_date_format("%Y"));
        let err = f.encode("f", &FieldValue::Int(2020)).unwrap_err();
        assert!(matches!(err, PathError::Conversion { .. }));
    }

    #[test]
    fn test_invalid_date_decodes_to_error() {
        let f = field(FieldConf::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"));
        let err = f.decode("f", "2025-13-45").unwrap_err();
        assert!(matches!(err, PathError::Decode { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_custom_converter() {
        let f = field(
            FieldConf::new(SafePatterns::FILENAME).with_converter(Converter::custom(UpperOp)),
        );
        assert_eq!(f.encode("f", &"my_data".into()).unwrap(), "MY_DATA");
        assert_eq!(f.decode("f", "MY_DATA").unwrap(), FieldValue::from("my_data"));
    }

    #[test]
    fn test_custom_converter_failure() {
        let f = field(FieldConf::new(r"\d+").with_converter(Converter::custom(IntegerOp::new())));
        let err = f.encode("f", &"abc".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("is not an integer"));
    }

    #[test]
    fn test_decode_optional_empty() {
        let f = field(FieldConf::new("dev|prod").with_optional(true));
        assert_eq!(f.decode("f", "").unwrap(), FieldValue::Null);
        assert_eq!(f.decode("f", "dev").unwrap(), FieldValue::from("dev"));
        assert!(f.decode("f", "qa").is_err());
    }

    #[test]
    fn test_decode_required_empty_fails() {
        let f = field(FieldConf::default());
        let err = f.decode("f", "").unwrap_err();
        assert!(matches!(err, PathError::FieldParse { .. }));
    }
}

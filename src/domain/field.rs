// Per-field configuration

use std::fmt;
use std::sync::Arc;

use super::converter::ValueConverter;
use super::patterns::SafePatterns;

/// How a field value is turned into a path fragment and back.
///
/// A field carries at most one converter; the variants are exclusive.
#[derive(Clone, Default)]
pub enum Converter {
    #[default]
    None,
    /// `chrono` strftime format producing and accepting `NaiveDate` values
    Date(String),
    /// `chrono` strftime format producing and accepting `NaiveDateTime` values
    DateTime(String),
    Custom(Arc<dyn ValueConverter>),
}

impl Converter {
    pub fn custom(converter: impl ValueConverter + 'static) -> Self {
        Converter::Custom(Arc::new(converter))
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::None => write!(f, "None"),
            Converter::Date(format) => write!(f, "Date({:?})", format),
            Converter::DateTime(format) => write!(f, "DateTime({:?})", format),
            Converter::Custom(c) => write!(f, "Custom({})", c.name()),
        }
    }
}

/// Configuration of one template field: its pattern, optionality and converter.
///
/// The pattern validates values passed to `get_path`/`get_parent_path` and
/// drives `parse_file_path`. Optional fields should use constrained patterns
/// (`[0-9]{4}` rather than `.*`), otherwise parsing may become ambiguous.
#[derive(Debug, Clone)]
pub struct FieldConf {
    pub pattern: String,
    pub optional: bool,
    pub converter: Converter,
}

impl FieldConf {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_date_format(self, format: impl Into<String>) -> Self {
        self.with_converter(Converter::Date(format.into()))
    }

    pub fn with_datetime_format(self, format: impl Into<String>) -> Self {
        self.with_converter(Converter::DateTime(format.into()))
    }
}

impl Default for FieldConf {
    fn default() -> Self {
        Self {
            pattern: SafePatterns::FILENAME.to_string(),
            optional: false,
            converter: Converter::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converter::UpperOp;

    #[test]
    fn test_default_field() {
        let conf = FieldConf::default();
        assert_eq!(conf.pattern, SafePatterns::FILENAME);
        assert!(!conf.optional);
        assert!(matches!(conf.converter, Converter::None));
    }

    #[test]
    fn test_setters_replace_converter() {
        let conf = FieldConf::new(r"\d{4}")
            .with_date_format("%Y")
            .with_converter(Converter::custom(UpperOp))
            .with_optional(true);
        assert!(conf.optional);
        assert_eq!(format!("{:?}", conf.converter), "Custom(upper)");
    }
}

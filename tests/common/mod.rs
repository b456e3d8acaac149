// Common test utilities shared across test files

use andar::{Converter, FieldConf, PathBuilder, SafePatterns, UpperOp};
use chrono::{NaiveDate, NaiveDateTime};

/// 2025-02-01 12:34:56
#[allow(dead_code)]
pub fn custom_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 1)
        .unwrap()
        .and_hms_opt(12, 34, 56)
        .unwrap()
}

#[allow(dead_code)]
pub fn custom_date() -> NaiveDate {
    custom_datetime().date()
}

/// Field configuration with date, datetime and case converters
#[allow(dead_code)]
pub fn converter_fields() -> Vec<(&'static str, FieldConf)> {
    vec![
        ("base_path", FieldConf::new(SafePatterns::DIRPATH)),
        (
            "intermediate_folder",
            FieldConf::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"),
        ),
        (
            "base_name",
            FieldConf::new(SafePatterns::FILENAME).with_converter(Converter::custom(UpperOp)),
        ),
        (
            "suffix",
            FieldConf::new(r"\d{4}-\d{2}-\d{2}_\d{6}").with_datetime_format("%Y-%m-%d_%H%M%S"),
        ),
        ("extension", FieldConf::new("[a-z]+")),
    ]
}

/// Builder for a template with every field configured as in [`converter_fields`]
#[allow(dead_code)]
pub fn converter_builder(template: &str) -> PathBuilder {
    PathBuilder::builder(template)
        .fields(converter_fields())
        .build()
        .expect("Failed to build path builder")
}

// YAML model file loading, including the demo models

use andar::{
    field_values, load_models_from_file, load_models_with_registry, ConverterRegistry, ErrorKind,
    FieldValue, FnConverter,
};
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_models(yml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yml.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_load_models_from_file() {
    let file = write_models(
        r#"
reports:
  template: "{base}/{day}/{name}.{ext}"
  parent_template: "{base}"
  fields:
    base:
      pattern: "@dirpath"
    day:
      pattern: '\d{8}'
      date_format: "%Y%m%d"
    ext:
      pattern: "csv|parquet"
"#,
    );
    let models = load_models_from_file(file.path()).unwrap();
    let reports = &models["reports"];
    assert_eq!(reports.parent_template(), "{base}");

    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let path = reports
        .get_path(&field_values! { "base" => "lake/raw", "day" => day, "name" => "orders", "ext" => "csv" })
        .unwrap();
    assert_eq!(path, "lake/raw/20240309/orders.csv");

    let parsed = reports.parse_file_path(&path, true).unwrap().unwrap();
    assert_eq!(parsed["day"], FieldValue::Date(day));
}

#[test]
fn test_demo_models_file() {
    let models = load_models_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/models.yml")).unwrap();

    let date_archived = &models["date_archived"];
    let path = "/data/archive/source/2024/01/15/2024-01-15_report_20240115_093000.csv";
    let parsed = date_archived.parse_file_path(path, true).unwrap().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(parsed["base_path"], FieldValue::from("data/archive"));
    assert_eq!(parsed["subfolder"], FieldValue::from("source"));
    assert_eq!(parsed["date_path"], FieldValue::Date(day));
    assert_eq!(parsed["date_prefix"], FieldValue::Date(day));
    assert_eq!(
        parsed["datetime_suffix"],
        FieldValue::DateTime(day.and_hms_opt(9, 30, 0).unwrap())
    );
    date_archived.assert_path_bijection(path);

    let data_mesh = &models["data_mesh"];
    let values = field_values! {
        "domain" => "sales",
        "layer" => "mart",
        "product" => "orders",
        "aggregation" => "daily",
        "date" => day,
        "ext" => "parquet",
    };
    assert_eq!(
        data_mesh.get_path(&values).unwrap(),
        "/sales/mart/orders/daily/20240115_orders.parquet"
    );
    data_mesh.assert_fields_bijection(&values);
    assert_eq!(
        data_mesh
            .get_parent_path(&field_values! { "domain" => "sales", "layer" => "mart" })
            .unwrap(),
        "/sales/mart"
    );
}

#[test]
fn test_custom_converter_registry() {
    let mut converters = ConverterRegistry::new();
    converters.register(Arc::new(FnConverter::new(
        "reversed",
        |value| Ok(value.to_string().chars().rev().collect()),
        |raw| Ok(FieldValue::Str(raw.chars().rev().collect())),
    )));

    let yml = r#"
codes:
  template: "{code}.txt"
  fields:
    code:
      converter: reversed
"#;
    let models = load_models_with_registry(yml, &converters).unwrap();
    let codes = &models["codes"];
    assert_eq!(codes.get_path(&field_values! { "code" => "abc" }).unwrap(), "cba.txt");
    assert_eq!(
        codes.parse_file_path("cba.txt", true).unwrap().unwrap()["code"],
        FieldValue::from("abc")
    );
}

#[test]
fn test_invalid_parent_template_in_file() {
    let file = write_models(
        r#"
broken:
  template: "{a}/{b}/{c}"
  parent_template: "{b}"
"#,
    );
    let err = load_models_from_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("must be a prefix of path_template"));
}

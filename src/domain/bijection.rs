// Round-trip checks between paths and field values, for use in tests

use super::builder::PathBuilder;
use super::value::{FieldValue, FieldValues};

fn render(values: &FieldValues) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|(name, value)| match value {
            FieldValue::Null => format!("'{}': null", name),
            FieldValue::Int(i) => format!("'{}': {}", name, i),
            other => format!("'{}': '{}'", name, other),
        })
        .collect();
    format!("{{{}}}", items.join(", "))
}

impl PathBuilder {
    /// Check that parsing `path` and regenerating it gives back `path`.
    ///
    /// # Panics
    ///
    /// Panics if the path does not parse, cannot be regenerated, or the
    /// regenerated path differs.
    pub fn assert_path_bijection(&self, path: &str) {
        let fields = match self.parse_file_path(path, false) {
            Ok(Some(fields)) => fields,
            Ok(None) => panic!("'{}' does not match pattern: '{}'", path, self.pattern().as_str()),
            Err(err) => panic!("{}", err),
        };
        let result = match self.get_path(&fields) {
            Ok(result) => result,
            Err(err) => panic!("{}", err),
        };
        if result != path {
            panic!("'{}' != '{}'", path, result);
        }
    }

    /// Check that generating a path from `values` and parsing it gives back `values`.
    ///
    /// # Panics
    ///
    /// Panics if either direction fails or the parsed values differ.
    pub fn assert_fields_bijection(&self, values: &FieldValues) {
        let path = match self.get_path(values) {
            Ok(path) => path,
            Err(err) => panic!("{}", err),
        };
        let parsed = match self.parse_file_path(&path, false) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => panic!("'{}' does not match pattern: '{}'", path, self.pattern().as_str()),
            Err(err) => panic!("{}", err),
        };
        if parsed != *values {
            panic!("{} != {}", render(values), render(&parsed));
        }
    }
}

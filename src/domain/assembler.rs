// Template assembly: fill a template with field values to produce a path

use std::collections::BTreeMap;

use super::normalize::normalize;
use super::registry::FieldRegistry;
use super::template::{Template, TemplatePart};
use super::value::{FieldValue, FieldValues};
use crate::error::Result;
use crate::validation::check_coverage;

static NULL: FieldValue = FieldValue::Null;

/// Resolve a template with the provided field values.
///
/// Optional fields without a value render as empty segments. Every other
/// template field must have a value, and no value may name a field the
/// template does not have.
pub fn assemble(template: &Template, registry: &FieldRegistry, values: &FieldValues) -> Result<String> {
    let mut values: BTreeMap<&str, &FieldValue> =
        values.iter().map(|(k, v)| (k.as_str(), v)).collect();

    for name in template.unique_field_names() {
        let is_optional = registry.get(name).map_or(false, |f| f.is_optional());
        if is_optional && !values.contains_key(name) {
            values.insert(name, &NULL);
        }
    }

    check_coverage(&template.field_names(), values.keys().copied())
        .into_usage_result(&template.to_string())?;

    let mut encoded: BTreeMap<&str, String> = BTreeMap::new();
    for (&name, &value) in &values {
        match registry.get(name) {
            Some(field) => {
                encoded.insert(name, field.encode(name, value)?);
            }
            None => tracing::warn!(field = name, "skipping field without configuration"),
        }
    }

    let mut result = String::new();
    for part in &template.parts {
        match part {
            TemplatePart::Literal(s) => result.push_str(s),
            TemplatePart::Field(name) => {
                if let Some(value) = encoded.get(name.as_str()) {
                    result.push_str(value);
                }
            }
        }
    }

    Ok(normalize(&result))
}

// Validation functions for andar
// Provides the coverage checks shared by construction and path assembly

use crate::error::{PathError, Result};

/// Outcome of comparing the fields of a template against a set of keys
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Keys that do not exist in the template
    pub invalid: Vec<String>,
    /// Template fields without a key, in template order
    pub missing: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.invalid.is_empty() && self.missing.is_empty()
    }

    /// Fail with a configuration error if the coverage is incomplete
    pub fn into_config_result(self, template: &str) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(PathError::FieldConfigMismatch {
            template: template.to_string(),
            invalid: self.invalid,
            missing: self.missing,
        })
    }

    /// Fail with a usage error if the coverage is incomplete
    pub fn into_usage_result(self, template: &str) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(PathError::FieldValuesMismatch {
            template: template.to_string(),
            invalid: self.invalid,
            missing: self.missing,
        })
    }
}

/// Check that template fields and keys match each other exactly.
///
/// Both directions are reported together so a single error lists every problem.
pub fn check_coverage<'a, I>(template_fields: &[&str], keys: I) -> Coverage
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: Vec<&str> = keys.into_iter().collect();

    let invalid = keys
        .iter()
        .filter(|key| !template_fields.contains(*key))
        .map(|key| key.to_string())
        .collect();

    let mut missing: Vec<String> = Vec::new();
    for field in template_fields {
        if !keys.contains(field) && !missing.iter().any(|m| m == field) {
            missing.push(field.to_string());
        }
    }

    Coverage { invalid, missing }
}

/// Check that the parent template is a literal prefix of the template
pub fn validate_parent_template(template: &str, parent_template: &str) -> Result<()> {
    if !template.starts_with(parent_template) {
        return Err(PathError::ParentTemplate {
            template: template.to_string(),
            parent_template: parent_template.to_string(),
        });
    }
    Ok(())
}

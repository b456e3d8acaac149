// Field registry: one compiled configuration per distinct template field

use regex::Regex;
use std::collections::BTreeMap;

use super::field::FieldConf;
use super::template::Template;
use crate::error::{PathError, Result};
use crate::validation::check_coverage;

/// A field configuration together with its anchored validators
#[derive(Debug, Clone)]
pub struct RegisteredField {
    conf: FieldConf,
    exact: Regex,
    exact_or_empty: Regex,
}

impl RegisteredField {
    pub fn compile(name: &str, conf: FieldConf) -> Result<Self> {
        let compile = |expr: String| {
            Regex::new(&expr).map_err(|source| PathError::InvalidPattern {
                field: name.to_string(),
                pattern: conf.pattern.clone(),
                source,
            })
        };
        let exact = compile(format!("^(?:{})$", conf.pattern))?;
        let exact_or_empty = compile(format!("^(?:{}|)$", conf.pattern))?;
        Ok(Self {
            conf,
            exact,
            exact_or_empty,
        })
    }

    pub fn conf(&self) -> &FieldConf {
        &self.conf
    }

    pub fn pattern(&self) -> &str {
        &self.conf.pattern
    }

    pub fn is_optional(&self) -> bool {
        self.conf.optional
    }

    /// Full match of an encoded value against the field pattern
    pub fn matches_exact(&self, value: &str) -> bool {
        self.exact.is_match(value)
    }

    /// Full match of a captured value; optional fields also accept the empty string
    pub fn matches_capture(&self, value: &str) -> bool {
        if self.conf.optional {
            self.exact_or_empty.is_match(value)
        } else {
            self.exact.is_match(value)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, RegisteredField>,
}

impl FieldRegistry {
    /// Overlay the explicit configurations onto `default` for every template field.
    ///
    /// Fails if an explicit configuration names a field the template does not have.
    pub fn build(
        template_source: &str,
        template: &Template,
        explicit: &BTreeMap<String, FieldConf>,
        default: &FieldConf,
    ) -> Result<Self> {
        let mut merged: BTreeMap<String, FieldConf> = template
            .unique_field_names()
            .into_iter()
            .map(|name| (name.to_string(), default.clone()))
            .collect();
        merged.extend(explicit.iter().map(|(k, v)| (k.clone(), v.clone())));

        check_coverage(
            &template.field_names(),
            merged.keys().map(String::as_str),
        )
        .into_config_result(template_source)?;

        let fields = merged
            .into_iter()
            .map(|(name, conf)| {
                let field = RegisteredField::compile(&name, conf)?;
                Ok((name, field))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredField> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Registry restricted to the given names
    pub fn subset(&self, names: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(name, _)| names.contains(&name.as_str()))
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect();
        Self { fields }
    }

    /// Plain configurations, as supplied by the caller
    pub fn confs(&self) -> BTreeMap<String, FieldConf> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.conf.clone()))
            .collect()
    }
}

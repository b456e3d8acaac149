// Parent path resolution with dynamic truncation of the parent template

use super::assembler::assemble;
use super::registry::FieldRegistry;
use super::template::Template;
use super::value::FieldValues;
use crate::error::{PathError, Result};

/// State of the walk over the parent template fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TruncationState<'a> {
    /// Every field so far is either supplied or optional
    Scanning,
    /// Stopped at the first required field without a value
    Truncated { field: &'a str },
}

impl<'a> TruncationState<'a> {
    fn step(self, field: &'a str, satisfied: bool) -> Self {
        match self {
            TruncationState::Scanning if !satisfied => TruncationState::Truncated { field },
            other => other,
        }
    }
}

/// The parent template actually used for a set of supplied values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentPlan<'a> {
    /// The configured parent template, unchanged
    Full { template: Template, fields: Vec<&'a str> },
    /// The parent template cut right before `missing_field`
    Truncated {
        template: Template,
        fields: Vec<&'a str>,
        missing_field: &'a str,
    },
}

impl<'a> ParentPlan<'a> {
    /// Walk the parent fields in order and cut at the first required field
    /// that has no value; optional fields never cause a cut.
    pub fn resolve(parent: &'a Template, registry: &FieldRegistry, values: &FieldValues) -> Self {
        let mut state = TruncationState::Scanning;
        let mut fields: Vec<&'a str> = Vec::new();

        for name in parent.field_names() {
            let optional = registry.get(name).map_or(false, |f| f.is_optional());
            state = state.step(name, optional || values.contains_key(name));
            match state {
                TruncationState::Scanning => {
                    if !fields.contains(&name) {
                        fields.push(name);
                    }
                }
                TruncationState::Truncated { .. } => break,
            }
        }

        match state {
            TruncationState::Scanning => ParentPlan::Full {
                template: parent.clone(),
                fields,
            },
            TruncationState::Truncated { field } => {
                let template = parent
                    .truncate_before(field)
                    .unwrap_or_else(|| Template::new(Vec::new()));
                tracing::debug!(
                    parent_template = %parent,
                    truncated = %template,
                    missing_field = field,
                    "truncated parent template"
                );
                ParentPlan::Truncated {
                    template,
                    fields,
                    missing_field: field,
                }
            }
        }
    }

    pub fn template(&self) -> &Template {
        match self {
            ParentPlan::Full { template, .. } | ParentPlan::Truncated { template, .. } => template,
        }
    }

    pub fn fields(&self) -> &[&'a str] {
        match self {
            ParentPlan::Full { fields, .. } | ParentPlan::Truncated { fields, .. } => fields,
        }
    }
}

/// Build the parent path for the supplied values.
///
/// Values for fields past a truncation point are rejected, since they would
/// silently be ignored otherwise.
pub fn parent_path(parent: &Template, registry: &FieldRegistry, values: &FieldValues) -> Result<String> {
    let plan = ParentPlan::resolve(parent, registry, values);
    let parent_fields = registry.subset(plan.fields());

    if let ParentPlan::Truncated {
        template,
        missing_field,
        ..
    } = &plan
    {
        let extra: Vec<(String, String)> = values
            .iter()
            .filter(|(name, _)| !parent_fields.contains(name))
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        if !extra.is_empty() {
            return Err(PathError::ExtraArguments {
                extra,
                template: template.to_string(),
                missing_field: missing_field.to_string(),
            });
        }
    }

    assemble(plan.template(), &parent_fields, values)
}

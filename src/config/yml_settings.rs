use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One path model as written in a YAML model file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<FieldSettings>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldSettings>,
}

/// Field configuration as written in a YAML model file.
///
/// `pattern` may name a safe pattern as `@filename`, `@dirpath`, `@field`,
/// `@extension` or `@name`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
}

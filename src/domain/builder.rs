// Path builder: define, create and parse templated paths

use std::collections::BTreeMap;
use std::fmt;

use super::assembler::assemble;
use super::field::FieldConf;
use super::normalize::dirname;
use super::parent::parent_path;
use super::pattern::CompiledPattern;
use super::registry::FieldRegistry;
use super::template::{Template, TemplateParser};
use super::value::{FieldValue, FieldValues};
use crate::error::{PathError, Result};
use crate::validation::validate_parent_template;

/// A path defined by a template and its fields.
///
/// Once built it can create new paths from field values, create parent
/// paths, and parse path strings back into typed field values. Builders
/// are immutable; [`PathBuilder::replace`] and [`PathBuilder::update`]
/// return new instances.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    template: String,
    parsed: Template,
    parent_template: String,
    parsed_parent: Template,
    default_field: FieldConf,
    registry: FieldRegistry,
    pattern: CompiledPattern,
}

/// Construction options for a [`PathBuilder`]
#[derive(Debug, Clone)]
pub struct PathBuilderConfig {
    template: String,
    parent_template: Option<String>,
    fields: BTreeMap<String, FieldConf>,
    default_field: Option<FieldConf>,
}

impl PathBuilderConfig {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            parent_template: None,
            fields: BTreeMap::new(),
            default_field: None,
        }
    }

    /// Parent template, a prefix of the template. Defaults to its directory part.
    pub fn parent_template(mut self, parent_template: impl Into<String>) -> Self {
        self.parent_template = Some(parent_template.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, conf: FieldConf) -> Self {
        self.fields.insert(name.into(), conf);
        self
    }

    pub fn fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldConf)>,
        K: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(name, conf)| (name.into(), conf)));
        self
    }

    /// Configuration used for every template field not configured explicitly
    pub fn default_field(mut self, conf: FieldConf) -> Self {
        self.default_field = Some(conf);
        self
    }

    pub fn build(self) -> Result<PathBuilder> {
        let parsed = TemplateParser::parse(&self.template)?;

        let parent_template = self
            .parent_template
            .unwrap_or_else(|| dirname(&self.template));
        validate_parent_template(&self.template, &parent_template)?;
        let parsed_parent = TemplateParser::parse(&parent_template)?;

        let default_field = self.default_field.unwrap_or_default();
        let registry = FieldRegistry::build(&self.template, &parsed, &self.fields, &default_field)?;
        let pattern = CompiledPattern::compile(&parsed, &registry)?;

        tracing::debug!(
            template = %self.template,
            parent_template = %parent_template,
            fields = registry.names().count(),
            "built path builder"
        );

        Ok(PathBuilder {
            template: self.template,
            parsed,
            parent_template,
            parsed_parent,
            default_field,
            registry,
            pattern,
        })
    }
}

/// Overrides applied by [`PathBuilder::replace`] and [`PathBuilder::update`]
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    template: Option<String>,
    parent_template: Option<String>,
    fields: Option<BTreeMap<String, Option<FieldConf>>>,
    default_field: Option<FieldConf>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn parent_template(mut self, parent_template: impl Into<String>) -> Self {
        self.parent_template = Some(parent_template.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, conf: FieldConf) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), Some(conf));
        self
    }

    /// Drop the explicit configuration of a field; it falls back to the default field
    pub fn remove_field(mut self, name: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), None);
        self
    }

    pub fn default_field(mut self, conf: FieldConf) -> Self {
        self.default_field = Some(conf);
        self
    }
}

impl PathBuilder {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        PathBuilderConfig::new(template).build()
    }

    pub fn builder(template: impl Into<String>) -> PathBuilderConfig {
        PathBuilderConfig::new(template)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parent_template(&self) -> &str {
        &self.parent_template
    }

    pub fn default_field(&self) -> &FieldConf {
        &self.default_field
    }

    /// Configuration of every template field, defaults included
    pub fn fields(&self) -> BTreeMap<String, FieldConf> {
        self.registry.confs()
    }

    pub fn field(&self, name: &str) -> Option<&FieldConf> {
        self.registry.get(name).map(|f| f.conf())
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Copy of this builder with the given overrides.
    ///
    /// Overridden fields replace the whole field configuration. Without a new
    /// template the current parent template is kept; with one, the parent
    /// template defaults to the new template's directory part.
    pub fn replace(&self, overrides: Overrides) -> Result<Self> {
        let fields = match overrides.fields {
            Some(fields) => fields
                .into_iter()
                .filter_map(|(name, conf)| conf.map(|conf| (name, conf)))
                .collect(),
            None => self.fields(),
        };
        self.rebuild(
            overrides.template,
            overrides.parent_template,
            fields,
            overrides.default_field,
        )
    }

    /// Copy of this builder with the given fields merged into the current ones.
    ///
    /// A removed field falls back to the default configuration if the
    /// template still uses it.
    pub fn update(&self, overrides: Overrides) -> Result<Self> {
        let mut fields = self.fields();
        for (name, conf) in overrides.fields.unwrap_or_default() {
            match conf {
                Some(conf) => {
                    fields.insert(name, conf);
                }
                None => {
                    fields.remove(&name);
                }
            }
        }
        self.rebuild(
            overrides.template,
            overrides.parent_template,
            fields,
            overrides.default_field,
        )
    }

    fn rebuild(
        &self,
        template: Option<String>,
        parent_template: Option<String>,
        fields: BTreeMap<String, FieldConf>,
        default_field: Option<FieldConf>,
    ) -> Result<Self> {
        let keeps_template = template.is_none();
        let mut config = PathBuilderConfig::new(template.unwrap_or_else(|| self.template.clone()))
            .fields(fields)
            .default_field(default_field.unwrap_or_else(|| self.default_field.clone()));

        match parent_template {
            Some(parent) => config = config.parent_template(parent),
            None if keeps_template => config = config.parent_template(self.parent_template.clone()),
            None => {}
        }
        config.build()
    }

    /// Generate a path from the given field values
    pub fn get_path(&self, values: &FieldValues) -> Result<String> {
        assemble(&self.parsed, &self.registry, values)
    }

    /// Generate a parent path from the given field values.
    ///
    /// Values are used in parent template order. If the trailing fields are
    /// omitted the parent template is cut before the first missing required
    /// field, giving a shorter ancestor path. Supplying a value for a field
    /// past that cut is an error.
    pub fn get_parent_path(&self, values: &FieldValues) -> Result<String> {
        parent_path(&self.parsed_parent, &self.registry, values)
    }

    /// Parse a path into typed field values.
    ///
    /// Returns `Ok(None)` if the path does not match, unless `strict` is set,
    /// in which case the mismatch is an error.
    pub fn parse_file_path(&self, path: &str, strict: bool) -> Result<Option<FieldValues>> {
        let Some(captures) = self.pattern.captures(path)? else {
            if strict {
                return Err(PathError::NoMatch {
                    input: path.to_string(),
                    pattern: self.pattern.as_str().to_string(),
                });
            }
            tracing::debug!(path, pattern = self.pattern.as_str(), "path does not match template");
            return Ok(None);
        };

        let mut fields = FieldValues::new();
        for (name, raw) in captures {
            let field = self.registry.get(&name).ok_or_else(|| PathError::FieldConfigMismatch {
                template: self.template.clone(),
                invalid: vec![],
                missing: vec![name.clone()],
            })?;
            let value = field.decode(&name, &raw)?;
            fields.insert(name, value);
        }
        Ok(Some(fields))
    }

    /// Decode a single raw path fragment for a field, as parsing would
    pub fn decode_field(&self, name: &str, raw: &str) -> Result<FieldValue> {
        let field = self.registry.get(name).ok_or_else(|| PathError::FieldValuesMismatch {
            template: self.template.clone(),
            invalid: vec![name.to_string()],
            missing: vec![],
        })?;
        field.decode(name, raw)
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Template: '{}', Fields: {{", self.template)?;
        for (idx, (name, field)) in self.registry.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            let conf = field.conf();
            write!(f, "'{}': {{pattern: '{}'", name, conf.pattern)?;
            if conf.optional {
                write!(f, ", optional")?;
            }
            write!(f, ", converter: {:?}}}", conf.converter)?;
        }
        write!(f, "}}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patterns::SafePatterns;
    use crate::error::ErrorKind;
    use crate::field_values;

    #[test]
    fn test_default_parent_template() {
        let builder = PathBuilder::new("/{a}/{b}/{name}.{ext}").unwrap();
        assert_eq!(builder.parent_template(), "/{a}/{b}");
        let builder = PathBuilder::new("{name}.{ext}").unwrap();
        assert_eq!(builder.parent_template(), "");
    }

    #[test]
    fn test_invalid_parent_template() {
        let err = PathBuilder::builder("prefix/{a}/{b}")
            .parent_template("prefix/{b}")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("must be a prefix of path_template"));
    }

    #[test]
    fn test_parse_strict_and_lenient() {
        let builder = PathBuilder::builder("{id}_{name}.{extension}")
            .field("id", FieldConf::new("[0-9]{5}"))
            .field("extension", FieldConf::new("txt"))
            .build()
            .unwrap();

        assert!(builder.parse_file_path("abc_name.txt", false).unwrap().is_none());

        let err = builder.parse_file_path("abc_name.txt", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err
            .to_string()
            .contains("Invalid string 'abc_name.txt', expected pattern"));

        let parsed = builder.parse_file_path("12345_name.txt", true).unwrap().unwrap();
        assert_eq!(parsed, field_values! { "id" => "12345", "name" => "name", "extension" => "txt" });
    }

    #[test]
    fn test_fields_include_defaults() {
        let builder = PathBuilder::builder("{dir}/{name}")
            .field("dir", FieldConf::new(SafePatterns::DIRPATH))
            .build()
            .unwrap();
        let fields = builder.fields();
        assert_eq!(fields["dir"].pattern, SafePatterns::DIRPATH);
        assert_eq!(fields["name"].pattern, SafePatterns::FILENAME);
    }

    #[test]
    fn test_custom_default_field() {
        let builder = PathBuilder::builder("{b}/{a}")
            .default_field(FieldConf::new(SafePatterns::FIELD).with_optional(true))
            .build()
            .unwrap();
        assert!(builder.field("a").unwrap().optional);
        assert_eq!(builder.get_path(&field_values! { "b" => "x" }).unwrap(), "x");
    }

    #[test]
    fn test_replace_keeps_parent_template_without_new_template() {
        let builder = PathBuilder::builder("{a}/{b}/{c}")
            .parent_template("{a}")
            .build()
            .unwrap();
        let replaced = builder.replace(Overrides::new()).unwrap();
        assert_eq!(replaced.parent_template(), "{a}");

        let retemplated = builder.replace(Overrides::new().template("{b}/{a}/{c}")).unwrap();
        assert_eq!(retemplated.parent_template(), "{b}/{a}");
    }

    #[test]
    fn test_replace_rejects_fields_missing_from_new_template() {
        let builder = PathBuilder::new("{a}/{b}").unwrap();
        let err = builder.replace(Overrides::new().template("{a}")).unwrap_err();
        assert!(err.to_string().contains("Invalid fields: ['b']"));
    }

    #[test]
    fn test_update_remove_field_restores_default() {
        let builder = PathBuilder::builder("{a}/{b}")
            .field("b", FieldConf::new("[0-9]+"))
            .build()
            .unwrap();
        let updated = builder.update(Overrides::new().remove_field("b")).unwrap();
        assert_eq!(updated.field("b").unwrap().pattern, SafePatterns::FILENAME);
        // the updated copy leaves the receiver intact
        assert_eq!(builder.field("b").unwrap().pattern, "[0-9]+");
    }

    #[test]
    fn test_decode_field() {
        let builder = PathBuilder::builder("{day}/{name}")
            .field("day", FieldConf::new(r"\d{8}").with_date_format("%Y%m%d"))
            .build()
            .unwrap();
        let day = builder.decode_field("day", "20240101").unwrap();
        assert_eq!(day, FieldValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(builder.decode_field("unknown", "x").is_err());
    }

    #[test]
    fn test_display() {
        let builder = PathBuilder::builder("{a}.{ext}")
            .field("ext", FieldConf::new("txt").with_optional(true))
            .build()
            .unwrap();
        let shown = builder.to_string();
        assert!(shown.starts_with("<Template: '{a}.{ext}', Fields: {"));
        assert!(shown.contains("'ext': {pattern: 'txt', optional, converter: None}"));
    }

    #[test]
    fn test_builder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PathBuilder>();
    }
}

use crate::{
    config::yml_settings::{FieldSettings, ModelSettings},
    domain::{Converter, ConverterRegistry, FieldConf, PathBuilder, SafePatterns},
    error::{PathError, Result},
};
use std::{collections::BTreeMap, path::Path};

const DEFAULT_FIELD_NAME: &str = "default_field";

impl FieldSettings {
    /// Resolve safe pattern references and named converters into a [`FieldConf`]
    pub fn into_conf(self, field: &str, converters: &ConverterRegistry) -> Result<FieldConf> {
        let count = [
            self.date_format.is_some(),
            self.datetime_format.is_some(),
            self.converter.is_some(),
        ]
        .into_iter()
        .filter(|is_set| *is_set)
        .count();
        if count > 1 {
            return Err(PathError::MultipleConverters {
                field: field.to_string(),
                count,
            });
        }

        let pattern = match self.pattern {
            Some(pattern) => resolve_pattern(field, &pattern)?,
            None => SafePatterns::FILENAME.to_string(),
        };

        let converter = match (self.date_format, self.datetime_format, self.converter) {
            (Some(format), _, _) => Converter::Date(format),
            (_, Some(format), _) => Converter::DateTime(format),
            (_, _, Some(name)) => {
                let converter = converters.get(&name).ok_or_else(|| PathError::UnknownConverter {
                    field: field.to_string(),
                    name,
                })?;
                Converter::Custom(converter)
            }
            (None, None, None) => Converter::None,
        };

        Ok(FieldConf::new(pattern)
            .with_optional(self.optional)
            .with_converter(converter))
    }
}

fn resolve_pattern(field: &str, pattern: &str) -> Result<String> {
    match pattern.strip_prefix('@') {
        Some(name) => SafePatterns::by_name(name)
            .map(str::to_string)
            .ok_or_else(|| PathError::UnknownSafePattern {
                field: field.to_string(),
                name: name.to_string(),
            }),
        None => Ok(pattern.to_string()),
    }
}

impl ModelSettings {
    pub fn into_builder(self, converters: &ConverterRegistry) -> Result<PathBuilder> {
        let mut config = PathBuilder::builder(self.template);
        if let Some(parent_template) = self.parent_template {
            config = config.parent_template(parent_template);
        }
        if let Some(default_field) = self.default_field {
            config = config.default_field(default_field.into_conf(DEFAULT_FIELD_NAME, converters)?);
        }
        for (name, settings) in self.fields {
            let conf = settings.into_conf(&name, converters)?;
            config = config.field(name, conf);
        }
        config.build()
    }
}

/// Load every model of a YAML model file, using the built-in converters
pub fn load_models(yml: &str) -> Result<BTreeMap<String, PathBuilder>> {
    load_models_with_registry(yml, &ConverterRegistry::new())
}

pub fn load_models_with_registry(
    yml: &str,
    converters: &ConverterRegistry,
) -> Result<BTreeMap<String, PathBuilder>> {
    let settings: BTreeMap<String, ModelSettings> = serde_yaml::from_str(yml)?;
    settings
        .into_iter()
        .map(|(model, settings)| {
            let builder = settings
                .into_builder(converters)
                .map_err(|source| PathError::Model {
                    model: model.clone(),
                    source: Box::new(source),
                })?;
            Ok((model, builder))
        })
        .collect()
}

pub fn load_models_from_file(path: impl AsRef<Path>) -> Result<BTreeMap<String, PathBuilder>> {
    let path = path.as_ref();
    let yml = std::fs::read_to_string(path).map_err(|source| PathError::ModelFile {
        path: path.display().to_string(),
        source,
    })?;
    let models = load_models(&yml)?;
    tracing::debug!(path = %path.display(), models = models.len(), "loaded model file");
    Ok(models)
}

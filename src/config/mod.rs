// YAML model files

pub mod models;
pub mod yml_settings;

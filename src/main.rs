use andar::{load_models_from_file, FieldValues, PathBuilder};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

const DEFAULT_MODELS_FILE: &str = "models.yml";

fn field_arg() -> Arg {
    Arg::new("field")
        .short('f')
        .long("field")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .help("Field value, may be repeated")
}

fn model_arg() -> Arg {
    Arg::new("model")
        .required(true)
        .value_name("MODEL")
        .help("Name of the path model")
}

fn cli() -> clap::Command {
    clap::Command::new("andar")
        .about("Define, generate and parse templated file paths")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            Arg::new("models")
                .short('m')
                .long("models")
                .value_name("MODELS")
                .global(true)
                .help("Path to a YAML file containing path models")
                .default_value(DEFAULT_MODELS_FILE),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            clap::Command::new("path")
                .about("Generate a path from field values")
                .arg(model_arg())
                .arg(field_arg()),
        )
        .subcommand(
            clap::Command::new("parent")
                .about("Generate a parent path from field values")
                .arg(model_arg())
                .arg(field_arg()),
        )
        .subcommand(
            clap::Command::new("parse")
                .about("Parse a path into field values, printed as JSON")
                .arg(model_arg())
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_name("PATH")
                        .help("Path to parse"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail if the path does not match the model"),
                ),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Decode `key=value` arguments through the model's field codecs
fn field_values(builder: &PathBuilder, matches: &ArgMatches) -> Result<FieldValues> {
    let mut values = FieldValues::new();
    for raw in matches.get_many::<String>("field").into_iter().flatten() {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid field argument '{}', expected KEY=VALUE", raw))?;
        let decoded = builder
            .decode_field(name, value)
            .with_context(|| format!("Invalid value for field '{}'", name))?;
        values.insert(name.to_string(), decoded);
    }
    Ok(values)
}

fn select_model<'a>(
    models: &'a BTreeMap<String, PathBuilder>,
    matches: &ArgMatches,
) -> Result<&'a PathBuilder> {
    let name = matches
        .get_one::<String>("model")
        .context("Missing model name")?;
    models.get(name).with_context(|| {
        let known: Vec<&str> = models.keys().map(String::as_str).collect();
        format!("Unknown model '{}', known models: {}", name, known.join(", "))
    })
}

fn run(matches: ArgMatches) -> Result<()> {
    let models_path = matches
        .get_one::<String>("models")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_MODELS_FILE);
    let models = load_models_from_file(models_path)
        .with_context(|| format!("Could not load models from '{}'", models_path))?;

    match matches.subcommand() {
        Some(("path", sub)) => {
            let builder = select_model(&models, sub)?;
            let values = field_values(builder, sub)?;
            println!("{}", builder.get_path(&values)?);
        }
        Some(("parent", sub)) => {
            let builder = select_model(&models, sub)?;
            let values = field_values(builder, sub)?;
            println!("{}", builder.get_parent_path(&values)?);
        }
        Some(("parse", sub)) => {
            let builder = select_model(&models, sub)?;
            let path = sub.get_one::<String>("path").context("Missing path")?;
            let parsed = builder.parse_file_path(path, sub.get_flag("strict"))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Some((other, _)) => bail!("Unknown command '{}'", other),
        None => bail!("No command given"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));
    run(matches)
}

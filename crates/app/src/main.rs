//! Lacuna - Main entry point
//!
//! Command-line placeholder resolver: reads a template, assembles a
//! property-source stack from flags, and prints the resolved text.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lacuna_application::{PlaceholderFormat, PropertyResolver};
use lacuna_domain::{PropertyMap, PropertySource, PropertySources};
use lacuna_infrastructure::{load_json_file, load_properties_file, system_environment_source};

/// Name of the source holding `-D` definitions.
const DEFINES_SOURCE_NAME: &str = "defines";

#[derive(Debug, Parser)]
#[command(name = "lacuna", version, about = "Resolve ${key} placeholders in text")]
struct Cli {
    /// Template file to resolve; reads stdin when omitted.
    template: Option<PathBuf>,

    /// Inline definition with highest precedence (repeatable).
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    defines: Vec<String>,

    /// A .properties file source (repeatable, in precedence order).
    #[arg(short = 'P', long = "properties", value_name = "FILE")]
    properties: Vec<PathBuf>,

    /// A flattened JSON file source (repeatable, in precedence order).
    #[arg(long = "json", value_name = "FILE")]
    json: Vec<PathBuf>,

    /// Do not add the process environment as the lowest-precedence source.
    #[arg(long)]
    no_env: bool,

    /// Fail on unresolvable placeholders instead of leaving them in place.
    #[arg(long)]
    strict: bool,

    /// Placeholder prefix.
    #[arg(long, default_value = "${")]
    prefix: String,

    /// Placeholder suffix.
    #[arg(long, default_value = "}")]
    suffix: String,

    /// Separator between a placeholder key and its default value.
    #[arg(long, default_value = ":")]
    separator: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "resolution failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let template = read_template(cli.template.as_deref())?;
    let resolver = build_resolver(cli)?;

    let resolved = if cli.strict {
        resolver.resolve_required_placeholders(&template)?
    } else {
        resolver.resolve_placeholders(&template)?
    };

    Ok(resolved)
}

fn read_template(path: Option<&Path>) -> Result<String, std::io::Error> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn build_resolver(cli: &Cli) -> Result<PropertyResolver, Box<dyn std::error::Error>> {
    let mut sources = PropertySources::new();

    let defines = parse_defines(&cli.defines)?;
    if !defines.is_empty() {
        sources.add_last(PropertySource::with_map(DEFINES_SOURCE_NAME, defines));
    }

    for path in &cli.properties {
        sources.add_last(load_properties_file(path)?);
    }
    for path in &cli.json {
        sources.add_last(load_json_file(path)?);
    }
    if !cli.no_env {
        sources.add_last(system_environment_source());
    }

    let format = PlaceholderFormat::new(cli.prefix.clone(), cli.suffix.clone())?;
    Ok(PropertyResolver::new(sources)
        .with_format(format)
        .with_value_separator(cli.separator.clone()))
}

fn parse_defines(defines: &[String]) -> Result<PropertyMap, Box<dyn std::error::Error>> {
    let mut map = PropertyMap::new();
    for define in defines {
        let Some((key, value)) = define.split_once('=') else {
            return Err(format!("invalid definition '{define}' (expected KEY=VALUE)").into());
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_defines() {
        let map = parse_defines(&["a=1".to_string(), "url=http://x?q=1".to_string()])
            .expect("valid defines");
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
        // Only the first '=' separates key and value.
        assert_eq!(map.get("url").map(String::as_str), Some("http://x?q=1"));
    }

    #[test]
    fn test_parse_defines_rejects_missing_separator() {
        assert!(parse_defines(&["novalue".to_string()]).is_err());
    }
}

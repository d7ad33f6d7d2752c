use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction};
use reqtemplate::config::{TemplateRegistry, DEFAULT_CONFIG_FILE};
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = clap::Command::new("reqtemplate")
        .about("Remap a request through a compiled request template")
        .arg(
            Arg::new("templates")
                .short('t')
                .long("templates")
                .value_name("TEMPLATES")
                .help("Path to a YAML file containing request templates")
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Template to evaluate"),
        )
        .arg(
            Arg::new("context")
                .short('c')
                .long("context")
                .value_name("CONTEXT")
                .help("JSON file holding the request context (defaults to stdin)"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Only compile the templates and list them"),
        )
        .get_matches();

    let templates_path = matches
        .get_one::<String>("templates")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_FILE);
    let registry = TemplateRegistry::from_file(templates_path)?;

    if matches.get_flag("check") {
        for name in registry.names() {
            match registry.description(name) {
                Some(description) => println!("{} - {}", name, description),
                None => println!("{}", name),
            }
        }
        return Ok(());
    }

    let Some(name) = matches.get_one::<String>("name") else {
        bail!("--name is required unless --check is given");
    };
    let template = registry
        .get(name)
        .with_context(|| format!("Unknown template: {}", name))?;

    let context = read_context(matches.get_one::<String>("context").map(|s| s.as_str()))?;
    let request = template.evaluate(&context);
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

fn read_context(path: Option<&str>) -> Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read context file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Could not read context from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Context is not valid JSON")
}

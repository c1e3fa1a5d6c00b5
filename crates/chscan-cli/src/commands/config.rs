//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use chscan_core::ChscanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.header_window")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => show_path(),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chscan")
        .join("config.json")
}

fn load_or_default() -> anyhow::Result<ChscanConfig> {
    let config_path = default_config_path();
    if config_path.exists() {
        Ok(ChscanConfig::from_file(&config_path)?)
    } else {
        Ok(ChscanConfig::default())
    }
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();
    if !config_path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    println!("{}", serde_json::to_string_pretty(&load_or_default()?)?);
    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    ChscanConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default()?)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);
    Ok(())
}

fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();
    let mut json = serde_json::to_value(load_or_default()?)?;

    // Bare words become strings; anything else is taken as JSON, so
    // numbers, booleans and lists keep their types.
    let parsed: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    set_json_key(&mut json, key, parsed)?;

    let config: ChscanConfig = serde_json::from_value(json)?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&config_path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

/// Replace the value at a dotted `key` path. Only keys that already
/// exist can be set, so typos never grow the configuration.
fn set_json_key(
    json: &mut serde_json::Value,
    key: &str,
    value: serde_json::Value,
) -> anyhow::Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (last, path) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    let mut current = json;
    for part in path {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    let section = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    if !section.contains_key(*last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    section.insert((*last).to_string(), value);

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'chscan config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_set_json_key_replaces_nested_value() {
        let mut json = serde_json::to_value(ChscanConfig::default()).unwrap();

        set_json_key(&mut json, "extraction.header_window", json!(250)).unwrap();

        let config: ChscanConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.extraction.header_window, 250);
    }

    #[test]
    fn test_set_json_key_replaces_top_level_section_field() {
        let mut json = serde_json::to_value(ChscanConfig::default()).unwrap();

        set_json_key(&mut json, "manifest.path_column", json!("Document")).unwrap();

        let config: ChscanConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.manifest.path_column, "Document");
    }

    #[test]
    fn test_set_json_key_rejects_unknown_key() {
        let mut json = serde_json::to_value(ChscanConfig::default()).unwrap();

        let err = set_json_key(&mut json, "extraction.no_such_field", json!(1)).unwrap_err();
        assert!(err.to_string().contains("extraction.no_such_field"));

        let err = set_json_key(&mut json, "nowhere.at_all", json!(1)).unwrap_err();
        assert!(err.to_string().contains("nowhere.at_all"));
    }
}

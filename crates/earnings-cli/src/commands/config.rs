//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use earnings_core::EarningsConfig;

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
        /// Configuration key (e.g., "extraction.policy")
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

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_config_path(config_path);
    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("earnings")
        .join("config.json")
}

/// The global `--config` path when given, else the default location.
fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration from an explicit path, else the default location,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EarningsConfig> {
    if let Some(path) = config_path {
        return EarningsConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config at {}", path.display());
        EarningsConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        Ok(EarningsConfig::default())
    }
}

fn show_config(config_path: &Path) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        EarningsConfig::from_file(config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        EarningsConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    EarningsConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        EarningsConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        EarningsConfig::default()
    };
    let json = serde_json::to_value(&config)?;

    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);

    Ok(())
}

fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        EarningsConfig::from_file(config_path)?
    } else {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        EarningsConfig::default()
    };

    let (config, parsed_value) = apply_setting(&config, key, value)?;
    config.save(config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> anyhow::Result<&'a serde_json::Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Set a dotted key on a copy of the config. The value is parsed as JSON when
/// possible and as a plain string otherwise.
fn apply_setting(
    config: &EarningsConfig,
    key: &str,
    value: &str,
) -> anyhow::Result<(EarningsConfig, serde_json::Value)> {
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(config)?;

    let (parent, last) = match key.rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None => (None, key),
    };

    let mut current = &mut json;
    if let Some(parent) = parent {
        for part in parent.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let obj = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !obj.contains_key(last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    obj.insert(last.to_string(), parsed_value.clone());

    let config = serde_json::from_value(json)
        .with_context(|| format!("Invalid value for {}: {}", key, value))?;

    Ok((config, parsed_value))
}

fn show_path(config_path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'earnings config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::MatchPolicy;

    #[test]
    fn test_apply_setting() {
        let (config, value) =
            apply_setting(&EarningsConfig::default(), "extraction.policy", "document").unwrap();

        assert_eq!(config.extraction.policy, MatchPolicy::Document);
        assert_eq!(value, serde_json::json!("document"));
    }

    #[test]
    fn test_apply_setting_rejects_unknown_key() {
        assert!(apply_setting(&EarningsConfig::default(), "display.colour", "red").is_err());
        assert!(apply_setting(&EarningsConfig::default(), "nope.policy", "document").is_err());
    }

    #[test]
    fn test_apply_setting_rejects_invalid_value() {
        assert!(apply_setting(&EarningsConfig::default(), "extraction.policy", "regex").is_err());
    }

    #[test]
    fn test_lookup() {
        let json = serde_json::to_value(EarningsConfig::default()).unwrap();
        assert_eq!(lookup(&json, "display.not_available").unwrap(), "N/A");
        assert!(lookup(&json, "display.missing").is_err());
    }

    #[test]
    fn test_resolve_config_path() {
        assert_eq!(
            resolve_config_path(Some("custom.json")),
            PathBuf::from("custom.json")
        );
        assert_eq!(resolve_config_path(None), default_config_path());
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"display": {"not_available": "-"}}"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.display.not_available, "-");
        assert_eq!(config.extraction.policy, MatchPolicy::Sentence);
    }
}

//! Config command implementation.
//!
//! View and modify datahub configuration settings.

use std::path::{Path, PathBuf};

use crate::cli::{Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::model::DataSource;

use super::config_path;

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let path = config_path(cli)?;
    match &args.action {
        ConfigAction::Show => show_config(cli, &path),
        ConfigAction::Get { key } => get_config_value(cli, &path, key),
        ConfigAction::Set { key, value } => set_config_value(&path, key, value),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init => init_config(&path),
        ConfigAction::Reset => reset_config(&path),
    }
}

fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}

/// Show full configuration.
fn show_config(cli: &Cli, path: &Path) -> Result<()> {
    let config = load_or_default(path)?;

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        _ => {
            println!("Datahub Configuration");
            println!("=====================\n");

            println!("[browse]");
            println!("  page_size = {}", config.browse.page_size);
            println!("  default_source = \"{}\"", config.browse.default_source);
            println!();

            println!("[storage]");
            match &config.storage.data_dir {
                Some(dir) => println!("  data_dir = \"{}\"", dir.display()),
                None => println!("  data_dir = # not set (platform default)"),
            }
            println!();

            println!("[datasets]");
            for source in DataSource::ALL {
                match config.datasets.path_for(source) {
                    Some(file) => println!("  {} = \"{}\"", source.key(), file.display()),
                    None => println!("  {} = # not set (built-in)", source.key()),
                }
            }
            println!();

            println!("[auth]");
            println!("  required = {}", config.auth.required);
        }
    }

    Ok(())
}

/// Get a specific configuration value.
fn get_config_value(cli: &Cli, path: &Path, key: &str) -> Result<()> {
    let config = load_or_default(path)?;

    let value = match key {
        "browse.page_size" => config.browse.page_size.to_string(),
        "browse.default_source" => config.browse.default_source.to_string(),
        "storage.data_dir" => display_path(config.storage.data_dir.as_deref(), "(platform default)"),
        "datasets.india" => display_path(config.datasets.india.as_deref(), "(built-in)"),
        "datasets.imf" => display_path(config.datasets.imf.as_deref(), "(built-in)"),
        "auth.required" => config.auth.required.to_string(),
        _ => return Err(unknown_key(key)),
    };

    match cli.effective_output() {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ key: value }));
        }
        _ => {
            println!("{value}");
        }
    }

    Ok(())
}

/// Set a configuration value.
fn set_config_value(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = load_or_default(path)?;

    match key {
        "browse.page_size" => {
            config.browse.page_size = parse_usize(value)?;
        }
        "browse.default_source" => {
            config.browse.default_source = value.parse()?;
        }
        "storage.data_dir" => {
            config.storage.data_dir = Some(PathBuf::from(value));
        }
        "datasets.india" => {
            config.datasets.india = Some(PathBuf::from(value));
        }
        "datasets.imf" => {
            config.datasets.imf = Some(PathBuf::from(value));
        }
        "auth.required" => {
            config.auth.required = parse_bool(value)?;
        }
        _ => return Err(unknown_key(key)),
    }

    config.validate()?;
    config.save_to(path)?;
    println!("Set {key} = {value}");

    Ok(())
}

/// Initialize configuration file with defaults.
fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use 'datahub config reset' to reset to defaults.");
        return Ok(());
    }

    Config::default().save_to(path)?;
    println!("Created configuration file at: {}", path.display());

    Ok(())
}

/// Reset configuration to defaults.
fn reset_config(path: &Path) -> Result<()> {
    if !path.exists() {
        println!("No configuration file exists. Use 'datahub config init' to create one.");
        return Ok(());
    }

    Config::default().save_to(path)?;
    println!("Reset configuration to defaults at: {}", path.display());

    Ok(())
}

fn display_path(path: Option<&Path>, unset: &str) -> String {
    path.map_or_else(|| unset.to_string(), |p| p.display().to_string())
}

fn unknown_key(key: &str) -> CatalogError {
    CatalogError::ConfigError {
        message: format!("Unknown configuration key: {key}"),
    }
}

/// Parse boolean value.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CatalogError::ConfigError {
            message: format!("Invalid boolean value: {s}. Use true/false."),
        }),
    }
}

/// Parse usize value.
fn parse_usize(s: &str) -> Result<usize> {
    s.parse().map_err(|_| CatalogError::ConfigError {
        message: format!("Invalid number: {s}"),
    })
}

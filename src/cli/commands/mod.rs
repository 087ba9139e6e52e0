//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod auth;
pub mod browse;
pub mod config;
pub mod facets;
pub mod flag;
pub mod tree;

use std::path::PathBuf;

use console::style;

use crate::api::Catalog;
use crate::cli::Cli;
use crate::config::{default_config_path, Config};
use crate::error::Result;
use crate::flags::FlagSet;
use crate::model::{DataSource, FlagKind};

/// Config file in effect: `--config`, else the default location.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

/// Load configuration, applying the `--data-dir` override.
///
/// An explicit `--config` file must exist and parse; the default location
/// may be absent.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Open the catalog without checking the login gate.
pub fn open_catalog(cli: &Cli) -> Result<Catalog> {
    Catalog::open(load_config(cli)?)
}

/// Open the catalog and require a login if the gate is enabled.
pub fn open_authenticated(cli: &Cli) -> Result<Catalog> {
    let catalog = open_catalog(cli)?;
    catalog.auth().require()?;
    Ok(catalog)
}

/// Source argument, else the configured default.
pub fn source_or_default(catalog: &Catalog, source: Option<DataSource>) -> DataSource {
    source.unwrap_or(catalog.config().browse.default_source)
}

/// One-character markers for the four flags, e.g. `B+P·`.
pub fn flag_markers(flags: FlagSet) -> String {
    FlagKind::ALL
        .into_iter()
        .map(|kind| {
            let (on, color) = match kind {
                FlagKind::Bookmark => ("B", console::Color::Yellow),
                FlagKind::Plus => ("+", console::Color::Green),
                FlagKind::Pin => ("P", console::Color::Cyan),
                FlagKind::More => ("M", console::Color::Magenta),
            };
            if flags.get(kind) {
                style(on).fg(color).bold().to_string()
            } else {
                style("·").dim().to_string()
            }
        })
        .collect()
}

/// Comma-separated names of the flags that are on.
pub fn flag_names(flags: FlagSet) -> String {
    flags
        .active()
        .map(FlagKind::name)
        .collect::<Vec<_>>()
        .join(",")
}

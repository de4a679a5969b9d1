// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Default config file name, looked up in the current working directory.
pub const DEFAULT_CONFIG_PATH: &str = "Dumprun.toml";

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; semantic validation happens
/// after the file has been merged with the CLI flags (see
/// [`crate::config::resolve`]).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load the config file if one is available.
///
/// An explicit path must exist and parse; the default `Dumprun.toml` is only
/// read when present, so running without any config file is fine.
pub fn load_optional(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_from_path(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_from_path(default)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

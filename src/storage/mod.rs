pub mod config;
pub mod records;

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{Config, ConfigStorage, GeneralConfig, TomlConfigStorage};
pub use records::{FlatFileStorage, FlatRecord, RecordStorage, parse_records};

/// Default data directory, following the XDG Base Directory Specification
/// $XDG_DATA_HOME/hotel (default: ~/.local/share/hotel)
///
/// Only resolves the path; use `ensure_dir` to create it.
pub fn data_home() -> Result<PathBuf> {
    let dir = xdg_dir(
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
        ".local/share",
    )?;
    log::debug!("Data directory: {:?}", dir);
    Ok(dir)
}

/// Default config directory
/// $XDG_CONFIG_HOME/hotel (default: ~/.config/hotel)
pub fn config_home() -> Result<PathBuf> {
    let dir = xdg_dir(
        env::var("XDG_CONFIG_HOME").ok(),
        env::var("HOME").ok(),
        ".config",
    )?;
    log::debug!("Config directory: {:?}", dir);
    Ok(dir)
}

/// Resolve `<xdg>/hotel`, falling back to `<home>/<home_default>/hotel`
fn xdg_dir(xdg: Option<String>, home: Option<String>, home_default: &str) -> Result<PathBuf> {
    if let Some(xdg) = xdg.filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(xdg).join("hotel"));
    }

    let home = home.ok_or_else(|| anyhow!("HOME environment variable not set"))?;
    Ok(PathBuf::from(home).join(home_default).join("hotel"))
}

/// Create a directory (and parents) if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))
}

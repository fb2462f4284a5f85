//! Config inspection commands

use std::path::Path;

use anyhow::{Context, Result};
use finwell_core::config::default_config_path;

use super::load_config;

/// Print the effective configuration as TOML
pub fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let toml = config
        .to_toml_string()
        .context("Failed to render config")?;
    print!("{}", toml);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            let status = if path.exists() { "✅ exists" } else { "not present, using built-in defaults" };
            println!("{} ({})", path.display(), status);
        }
        None => println!("No data directory available on this platform; using built-in defaults"),
    }
    Ok(())
}

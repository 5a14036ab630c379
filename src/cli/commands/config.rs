//! Config Command
//!
//! Inspect the effective configuration and where it comes from.

use crate::config::ConfigLoader;
use crate::types::{Result, ScopeError};

/// Show current effective configuration
pub fn show(as_json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!(
            "{}",
            toml::to_string_pretty(&config).map_err(|e| ScopeError::Config(e.to_string()))?
        );
    }

    Ok(())
}

/// Show configuration file paths
pub fn path() {
    println!("Configuration paths:");
    println!();

    if let Some(global) = ConfigLoader::global_config_path() {
        let exists = if global.exists() { "✓" } else { "✗" };
        println!("  Global:  {} {}", exists, global.display());
    } else {
        println!("  Global:  (not available)");
    }

    let project = ConfigLoader::project_config_path();
    let exists = if project.exists() { "✓" } else { "✗" };
    println!("  Project: {} {}", exists, project.display());
}

//! Config command implementation.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::{parse_max_order, Config};

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("gra CLI Configuration");
    println!("{:-<40}", "");
    println!(
        "Max Order:        {}",
        config
            .max_order
            .map(|limit| limit.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("Output Directory: {}", config.output_dir.display());

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "max-order" => {
            config.max_order = parse_max_order(value)?;
            println!("Set max-order to: {value}");
        }
        "output-dir" => {
            config.output_dir = PathBuf::from(value);
            println!("Set output-dir to: {value}");
        }
        _ => {
            anyhow::bail!("Unknown config key: {key}. Valid keys: max-order, output-dir");
        }
    }

    config.save()?;
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    Config::default().save()?;
    println!("Configuration reset to defaults");
    Ok(())
}

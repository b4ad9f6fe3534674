//! CLI configuration management.
//!
//! Values come from built-in defaults, then the JSON config file, then
//! environment variables (a `.env` file is loaded first if present).

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vertex-count ceiling applied to runs whose experiment sets none.
    pub max_order: Option<usize>,

    /// Directory where `run --save` writes final generations.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_order: Some(100_000),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path).with_context(|| {
                    format!("Failed to read config from {}", config_path.display())
                })?;
                config = serde_json::from_str(&contents)
                    .with_context(|| "Failed to parse config file")?;
            }
        }

        // Environment variables take precedence over the file
        if let Ok(max_order) = std::env::var("GRA_MAX_ORDER") {
            config.max_order = parse_max_order(&max_order)
                .with_context(|| format!("Invalid GRA_MAX_ORDER: {max_order}"))?;
        }
        if let Ok(output_dir) = std::env::var("GRA_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        Ok(config)
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "gra", "gra").map(|dirs| dirs.config_dir().join("config.json"))
    }
}

/// Parse a vertex ceiling; `none` (or `0`) disables it.
pub fn parse_max_order(value: &str) -> Result<Option<usize>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let limit: usize = value.parse()?;
    Ok((limit > 0).then_some(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_order() {
        assert_eq!(parse_max_order("500").unwrap(), Some(500));
        assert_eq!(parse_max_order(" none ").unwrap(), None);
        assert_eq!(parse_max_order("0").unwrap(), None);
        assert!(parse_max_order("lots").is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"output_dir":"out"}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_order, Config::default().max_order);
    }
}

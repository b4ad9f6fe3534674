//! CLI command implementations.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use gra_automaton::ExperimentDescription;
use gra_core::Graph;

pub mod config;
pub mod init;
pub mod iso;
pub mod jump;
pub mod rule;
pub mod run;

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {other}. Valid formats: text, json"),
        }
    }
}

/// Read a graph file (`{"adjacency": [...], "state": [...]}`).
pub fn load_graph(path: &Path) -> Result<Graph> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid graph file: {}", path.display()))
}

/// Read an experiment description file.
pub fn load_experiment(path: &Path) -> Result<ExperimentDescription> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read experiment from {}", path.display()))?;
    ExperimentDescription::from_json(&contents)
        .with_context(|| format!("Invalid experiment file: {}", path.display()))
}

/// Write a value as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

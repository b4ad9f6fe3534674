//! Init command implementation.

use std::path::Path;

use anyhow::Result;

use gra_automaton::ExperimentDescription;

use super::write_json;

/// Write the sample experiment to `path`.
pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let sample = ExperimentDescription::sample()?;
    write_json(path, &sample)?;
    println!("Wrote sample experiment to: {}", path.display());
    Ok(())
}

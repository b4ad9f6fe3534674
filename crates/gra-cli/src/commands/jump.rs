//! Jump command implementation.

use std::path::Path;

use anyhow::Result;

use gra_automaton::RuleCode;

use super::{load_graph, write_json};

/// Evolve the graph at `path` by `steps` generations under rule
/// `number` of the given degree.
pub fn execute(path: &Path, degree: usize, number: u64, steps: u64, output: Option<&Path>) -> Result<()> {
    let graph = load_graph(path)?;
    let rule = RuleCode::new(degree, number)?;

    let result = rule.jump(&graph, steps)?;

    match output {
        Some(output) => {
            write_json(output, &result)?;
            println!(
                "{} -> {} vertices after {} step(s); saved to: {}",
                graph.order(),
                result.order(),
                steps,
                output.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

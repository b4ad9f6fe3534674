//! Rule command implementation.
//!
//! Prints the binary expansion of a rule and its per-configuration table.

use anyhow::Result;

use gra_automaton::RuleCode;

use super::OutputFormat;

/// Show the behavior of rule `number` at the given degree.
pub fn execute(degree: usize, number: u64, format: OutputFormat) -> Result<()> {
    let rule = RuleCode::new(degree, number)?;

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "degree": rule.degree(),
                "number": rule.number(),
                "binary_digits": rule.binary_digits(),
                "entries": rule.entries().collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let digits: String = rule
                .binary_digits()
                .iter()
                .map(|d| char::from(b'0' + d))
                .collect();
            println!("{rule}");
            println!("Digits: {digits}");
            println!("{:-<48}", "");
            println!("{:>6} {:>5} {:>6} {:>6} {:>8}", "config", "state", "alive", "next", "divides");
            for entry in rule.entries() {
                println!(
                    "{:>6} {:>5} {:>6} {:>6} {:>8}",
                    entry.configuration,
                    entry.own_state,
                    entry.alive_neighbors,
                    entry.next_state,
                    if entry.divides { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}

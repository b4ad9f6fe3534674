//! Growth of the ten-vertex cubic graph under degree-3 rule 2236.
//!
//! Prints the rule table, then one line per generation with its order, alive
//! count and divisions.
//!
//! Run with:
//! ```bash
//! cargo run --example rule_2236_growth -p gra-automaton
//! ```

use gra_automaton::{AutomatonConfig, AutomatonResult, ExperimentDescription};

fn main() -> AutomatonResult<()> {
    let description = ExperimentDescription::sample()?.with_config(AutomatonConfig {
        max_ticks: 12,
        max_order: Some(10_000),
        ..Default::default()
    });

    println!("{}", description.rule);
    for entry in description.rule.entries() {
        println!(
            "  c={} (state {}, {} alive) -> state {}{}",
            entry.configuration,
            entry.own_state,
            entry.alive_neighbors,
            entry.next_state,
            if entry.divides { ", divides" } else { "" }
        );
    }
    println!();

    let mut automaton = description.build_automaton()?;
    println!("{:>4} {:>7} {:>6} {:>9}", "tick", "order", "alive", "divisions");
    println!(
        "{:>4} {:>7} {:>6} {:>9}",
        0,
        automaton.graph().order(),
        automaton.graph().alive_count(),
        "-"
    );

    let summary = automaton.run()?;
    for tick in automaton.tick_history() {
        println!(
            "{:>4} {:>7} {:>6} {:>9}",
            tick.tick, tick.order, tick.alive, tick.divisions
        );
    }

    println!("\nstopped: {:?}", summary.stop_reason);
    if let Some(cycle) = summary.cycle {
        println!(
            "generation {} repeats every {} tick(s)",
            cycle.start_tick, cycle.period
        );
    }

    Ok(())
}

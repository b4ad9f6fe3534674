//! Run command implementation.
//!
//! Loads an experiment, evolves it until the runner stops, and reports the
//! growth sequence.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use gra_automaton::{RunSummary, StopReason};

use super::{load_experiment, write_json, OutputFormat};
use crate::config::Config;

/// Command-line overrides for a run.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub max_ticks: Option<usize>,
    /// `Some(None)` disables the ceiling.
    pub max_order: Option<Option<usize>>,
    pub output: Option<PathBuf>,
    pub save: bool,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct RunReport<'a> {
    name: &'a str,
    rule: u64,
    degree: usize,
    final_order: usize,
    final_alive: usize,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// Execute the run command.
pub fn execute(config: &Config, path: &Path, options: RunOptions) -> Result<RunSummary> {
    let mut experiment = load_experiment(path)?;

    if let Some(max_ticks) = options.max_ticks {
        experiment.config.max_ticks = max_ticks;
    }
    match options.max_order {
        Some(limit) => experiment.config.max_order = limit,
        None if experiment.config.max_order.is_none() => {
            experiment.config.max_order = config.max_order;
        }
        None => {}
    }

    info!(
        name = %experiment.meta.name,
        rule = experiment.rule.number(),
        max_ticks = experiment.config.max_ticks,
        "run_start"
    );

    let mut automaton = experiment.build_automaton()?;
    let summary = automaton.run()?;
    let last = automaton.graph();

    match options.format {
        OutputFormat::Json => {
            let report = RunReport {
                name: &experiment.meta.name,
                rule: experiment.rule.number(),
                degree: experiment.rule.degree(),
                final_order: last.order(),
                final_alive: last.alive_count(),
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Experiment: {}", experiment.meta.name);
            println!("Rule:       {}", experiment.rule);
            println!("{:-<40}", "");
            println!("Ticks:      {}", summary.ticks);
            println!("Stopped:    {}", stop_reason_label(&summary));
            println!("Order:      {}", last.order());
            println!("Alive:      {}", last.alive_count());
            let growth: Vec<String> = summary.growth.iter().map(ToString::to_string).collect();
            println!("Growth:     {}", growth.join(" "));
        }
    }

    if let Some(output) = &options.output {
        write_json(output, last)?;
        println!("Saved generation {} to: {}", summary.final_tick, output.display());
    }
    if options.save {
        let file = config.output_dir.join(format!(
            "{}-tick{}.json",
            experiment.meta.name, summary.final_tick
        ));
        write_json(&file, last)?;
        println!("Saved generation {} to: {}", summary.final_tick, file.display());
    }

    Ok(summary)
}

fn stop_reason_label(summary: &RunSummary) -> String {
    match (summary.stop_reason, summary.cycle) {
        (StopReason::Cycle, Some(cycle)) => format!(
            "cycle (generation {} repeats with period {})",
            cycle.start_tick, cycle.period
        ),
        (StopReason::Cycle, None) => "cycle".to_string(),
        (StopReason::MaxTicks, _) => "max ticks".to_string(),
        (StopReason::OrderLimit, _) => "order limit".to_string(),
    }
}

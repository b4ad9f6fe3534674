//! gra CLI - run graph-rewriting automata experiments from JSON files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::OutputFormat;
use config::Config;

/// gra - evolve regular graphs under numbered rewriting rules.
#[derive(Parser, Debug)]
#[command(
    name = "gra",
    author,
    version,
    about = "Graph-rewriting automata: evolve, compare and inspect rules",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an experiment file until a cycle, the order limit, or max ticks.
    Run {
        /// Experiment description (JSON).
        path: PathBuf,

        /// Override the experiment's tick limit.
        #[arg(long)]
        max_ticks: Option<usize>,

        /// Override the vertex ceiling (`none` disables it).
        #[arg(long)]
        max_order: Option<String>,

        /// Write the final generation to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the final generation into the configured output directory.
        #[arg(long)]
        save: bool,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Evolve a graph file by a number of steps.
    Jump {
        /// Graph file (JSON with `adjacency` and `state`).
        graph: PathBuf,

        /// Regularity degree of the rule.
        #[arg(short, long)]
        degree: usize,

        /// Rule number.
        #[arg(short, long)]
        rule: u64,

        /// Number of steps.
        #[arg(short, long, default_value_t = 1)]
        steps: u64,

        /// Write the resulting graph here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test two graph files for state-aware isomorphism.
    Iso {
        /// First graph file.
        first: PathBuf,

        /// Second graph file.
        second: PathBuf,

        /// Print the vertex mapping when one exists.
        #[arg(long)]
        mapping: bool,
    },

    /// Show the behavior table of a rule.
    Rule {
        /// Regularity degree.
        #[arg(short, long)]
        degree: usize,

        /// Rule number.
        #[arg(short, long)]
        number: u64,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write a sample experiment file.
    Init {
        /// Destination file.
        #[arg(default_value = "experiment.json")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Run {
            path,
            max_ticks,
            max_order,
            output,
            save,
            format,
        } => {
            let format: OutputFormat = format.parse()?;
            let options = commands::run::RunOptions {
                max_ticks,
                max_order: max_order
                    .as_deref()
                    .map(config::parse_max_order)
                    .transpose()?,
                output,
                save,
                format,
            };
            commands::run::execute(&config, &path, options)?;
        }

        Commands::Jump {
            graph,
            degree,
            rule,
            steps,
            output,
        } => {
            commands::jump::execute(&graph, degree, rule, steps, output.as_deref())?;
        }

        Commands::Iso {
            first,
            second,
            mapping,
        } => {
            commands::iso::execute(&first, &second, mapping)?;
        }

        Commands::Rule {
            degree,
            number,
            format,
        } => {
            let format: OutputFormat = format.parse()?;
            commands::rule::execute(degree, number, format)?;
        }

        Commands::Init { path, force } => {
            commands::init::execute(&path, force)?;
        }

        Commands::Config(config_cmd) => {
            let mut config = config;
            match config_cmd {
                ConfigCommands::Show => commands::config::show(&config)?,
                ConfigCommands::Set { key, value } => {
                    commands::config::set(&mut config, &key, &value)?
                }
                ConfigCommands::Reset => commands::config::reset()?,
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}

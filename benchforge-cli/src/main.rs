// SPDX-License-Identifier: Apache-2.0

//! benchforge CLI
//!
//! Command-line interface for the benchmark packaging and execution harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// benchforge - Benchmark packaging and execution harness
#[derive(Parser)]
#[command(name = "benchforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "benchforge.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package the benchmark module and its dependencies into a fat archive
    Package,

    /// Run the packaged benchmark harness
    RunBenchmarks {
        /// Argument string forwarded to the harness, split on whitespace
        #[arg(long, default_value = "")]
        args: String,
    },

    /// Hand a results file to the configured analyzer
    Report {
        /// Results file path (default: <report_dir>/results.json)
        #[arg(long)]
        results_file: Option<PathBuf>,
    },

    /// Print a built-in throughput summary for a results file
    Analyze {
        /// Path to the results JSON file
        file: PathBuf,
    },

    /// Validate the configuration file
    Validate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Package => commands::package::execute(&cli.config),
        Commands::RunBenchmarks { args } => commands::run::execute(&cli.config, &args),
        Commands::Report { results_file } => {
            commands::report::execute(&cli.config, results_file.as_deref())
        }
        Commands::Analyze { file } => commands::analyze::execute(&file),
        Commands::Validate => commands::validate::execute(&cli.config),
    }
}

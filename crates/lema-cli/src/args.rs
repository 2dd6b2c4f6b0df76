//! CLI argument definitions using clap
//!
//! - lema evaluate --config eval.yaml      # Run an evaluation
//! - lema validate --config eval.yaml      # Check a config file
//! - lema report out/eval.json             # Render a saved report

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lema_core::{EvaluationFramework, LogFormat};
use lema_eval::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "lema")]
#[command(about = "LEMA - evaluate language models on benchmark datasets")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an evaluation and save <output_dir>/eval.json
    Evaluate {
        /// Evaluation config file (.json, .yaml, .yml or .toml)
        #[arg(long, short)]
        config: PathBuf,

        /// Override the configured framework (LEMA or LM_HARNESS)
        #[arg(long)]
        framework: Option<EvaluationFramework>,

        /// Override the configured output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Override the configured number of samples
        #[arg(long)]
        num_samples: Option<usize>,

        /// Format of the summary printed after the run
        #[arg(long, default_value = "table")]
        format: ReportFormat,
    },

    /// Load and validate a config file without evaluating
    Validate {
        /// Evaluation config file
        #[arg(long, short)]
        config: PathBuf,
    },

    /// Render a saved evaluation report
    Report {
        /// Path to an eval.json file
        input: PathBuf,

        /// Output format: table, json or markdown
        #[arg(long, default_value = "table")]
        format: ReportFormat,
    },
}

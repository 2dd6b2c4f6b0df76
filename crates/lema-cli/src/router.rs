//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate {
            config,
            framework,
            output_dir,
            num_samples,
            format,
        } => {
            commands::evaluate::run(commands::EvaluateArgs {
                config,
                framework,
                output_dir,
                num_samples,
                format,
            })
            .await
        }
        Commands::Validate { config } => commands::validate::run(&config),
        Commands::Report { input, format } => commands::report::run(&input, format),
    }
}

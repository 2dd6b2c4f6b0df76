//! LEMA evaluation CLI
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/lema-cli
//! ```
//!
//! Models and datasets are resolved from the local hub (`~/.lema/hub` or
//! `LEMA_HUB_DIR`). See `lema --help` for the full command list.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use clap::Parser;
use lema_core::LoggingConfig;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default().with_format(cli.log_format);
    if cli.verbose {
        logging_config = logging_config.verbose();
    }
    logging::init(&logging_config);

    router::route(cli).await
}

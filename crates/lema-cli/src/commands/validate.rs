//! `lema validate`

use std::path::Path;

use anyhow::{Context, Result};
use lema_core::load_evaluation_config;

use crate::console;

/// Load and validate a config file, printing a short summary
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_evaluation_config(config_path)
        .with_context(|| format!("Invalid config {}", config_path.display()))?;

    console::success(&format!("{} is valid", config_path.display()));
    console::info(&format!("Model: {}", config.model().model_name));
    console::info(&format!("Framework: {}", config.evaluation_framework()));
    for dataset in &config.data().datasets {
        console::info(&format!(
            "Dataset: {} (split {})",
            dataset.dataset_name, dataset.split
        ));
    }
    console::info(&format!("Output: {}", config.output_dir().display()));

    Ok(())
}

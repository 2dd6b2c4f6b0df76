//! File-based configuration loading

use std::fs;
use std::path::Path;

use crate::error::{LemaError, LemaResult};
use crate::types::EvaluationConfig;

/// Load an evaluation configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension; any other
/// extension is parsed as JSON. Unlike settings, a missing file is an error.
pub fn load_evaluation_config(path: &Path) -> LemaResult<EvaluationConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        LemaError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading evaluation configuration from '{}'", path.display()),
        )
    })?;

    parse_evaluation_config(&content, path)
}

fn parse_evaluation_config(content: &str, path: &Path) -> LemaResult<EvaluationConfig> {
    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(content).map_err(|e| {
            LemaError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| {
            LemaError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(content).map_err(|e| {
            LemaError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    tracing::debug!(path = %path.display(), "Loaded evaluation config");
    Ok(config)
}

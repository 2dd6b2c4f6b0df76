//! Locations of the local model and dataset hubs

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LemaError, LemaResult};

/// Environment variable for the hub root directory
pub const HUB_DIR_ENV: &str = "LEMA_HUB_DIR";
/// Environment variable overriding the datasets directory
pub const DATASETS_DIR_ENV: &str = "LEMA_DATASETS_DIR";
/// Environment variable overriding the models directory
pub const MODELS_DIR_ENV: &str = "LEMA_MODELS_DIR";
/// Environment variable for the model request timeout
pub const REQUEST_TIMEOUT_ENV: &str = "LEMA_REQUEST_TIMEOUT_SECS";

fn default_request_timeout() -> u64 {
    120
}

/// Where models and datasets are resolved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSettings {
    /// Root of the dataset hub; `<datasets_dir>/<dataset_name>/...`
    pub datasets_dir: PathBuf,

    /// Root of the model hub; `<models_dir>/<model_name>/config.json`
    pub models_dir: PathBuf,

    /// Timeout for a single model request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl HubSettings {
    /// Settings rooted at a single hub directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            datasets_dir: root.join("datasets"),
            models_dir: root.join("models"),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Default hub root, `~/.lema/hub`
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lema")
            .join("hub")
    }

    /// Load settings from `LEMA_*` environment variables
    pub fn from_env() -> LemaResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from `LEMA_*` variables read through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LemaResult<Self> {
        let root = lookup(HUB_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_root);
        let mut settings = Self::with_root(root);

        if let Some(dir) = lookup(DATASETS_DIR_ENV) {
            settings.datasets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(MODELS_DIR_ENV) {
            settings.models_dir = PathBuf::from(dir);
        }
        if let Some(timeout) = lookup(REQUEST_TIMEOUT_ENV) {
            settings.request_timeout_secs = timeout.parse().map_err(|_| {
                LemaError::config_field(
                    format!("Invalid {} value: '{}'", REQUEST_TIMEOUT_ENV, timeout),
                    REQUEST_TIMEOUT_ENV,
                )
            })?;
        }

        Ok(settings)
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self::with_root(Self::default_root())
    }
}

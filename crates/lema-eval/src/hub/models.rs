//! Model resolution from a local hub directory
//!
//! Each model has a manifest at `<models_dir>/<model_name>/config.json` that
//! says where the model is served. A manifest with an `auto_map` entry
//! declares custom loading code and is refused unless the caller set
//! `trust_remote_code`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lema_core::{LemaError, LemaResult, ModelParams, ResourceKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ModelResolver;
use crate::model::{LanguageModel, OpenAiCompletionsModel};

/// File name of a model manifest inside its hub directory
pub const MODEL_MANIFEST_FILE: &str = "config.json";

/// How a hub model is served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Base URL of an OpenAI-compatible API, e.g. `http://localhost:8000/v1`
    pub endpoint: String,

    /// Model id the server expects; defaults to the hub name
    #[serde(default)]
    pub served_model_name: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Custom code entry points
    #[serde(default)]
    pub auto_map: Option<serde_json::Value>,
}

impl ModelManifest {
    pub fn requires_remote_code(&self) -> bool {
        self.auto_map.is_some()
    }
}

/// Resolver for models described by manifests under a hub directory
pub struct HubModelResolver {
    models_dir: PathBuf,
    http_client: Client,
}

impl HubModelResolver {
    pub fn new(models_dir: impl AsRef<Path>, request_timeout: Duration) -> LemaResult<Self> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LemaError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(models_dir, http_client))
    }

    pub fn with_client(models_dir: impl AsRef<Path>, http_client: Client) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
            http_client,
        }
    }

    /// Read and check the manifest for a model
    pub async fn load_manifest(&self, params: &ModelParams) -> LemaResult<ModelManifest> {
        let relative = Path::new(&params.model_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(LemaError::resolution(
                ResourceKind::Model,
                &params.model_name,
                "model name must be a relative hub identifier",
            ));
        }

        let manifest_path = self.models_dir.join(relative).join(MODEL_MANIFEST_FILE);
        let content = match tokio::fs::read_to_string(&manifest_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LemaError::resolution(
                    ResourceKind::Model,
                    &params.model_name,
                    format!("no manifest at {}", manifest_path.display()),
                ));
            }
            Err(e) => {
                return Err(LemaError::io_with_path(
                    format!("Failed to read model manifest: {}", e),
                    manifest_path.display().to_string(),
                ));
            }
        };

        let manifest: ModelManifest = serde_json::from_str(&content).map_err(|e| {
            LemaError::resolution(
                ResourceKind::Model,
                &params.model_name,
                format!("invalid manifest {}: {}", manifest_path.display(), e),
            )
        })?;

        if manifest.requires_remote_code() && !params.trust_remote_code {
            return Err(LemaError::resolution(
                ResourceKind::Model,
                &params.model_name,
                "model declares custom code (auto_map); set trust_remote_code to allow it",
            ));
        }

        Ok(manifest)
    }
}

#[async_trait]
impl ModelResolver for HubModelResolver {
    async fn resolve(&self, params: &ModelParams) -> LemaResult<Arc<dyn LanguageModel>> {
        let manifest = self.load_manifest(params).await?;

        let served_model_name = manifest
            .served_model_name
            .clone()
            .unwrap_or_else(|| params.model_name.clone());
        let mut model = OpenAiCompletionsModel::new(
            &params.model_name,
            &manifest.endpoint,
            served_model_name,
            self.http_client.clone(),
        );

        if let Some(var) = &manifest.api_key_env {
            let api_key = std::env::var(var).map_err(|_| {
                LemaError::resolution(
                    ResourceKind::Model,
                    &params.model_name,
                    format!("API key variable {} is not set", var),
                )
            })?;
            model = model.with_api_key(api_key);
        }

        tracing::debug!(
            model = %params.model_name,
            endpoint = %manifest.endpoint,
            "Resolved model"
        );
        Ok(Arc::new(model))
    }
}

//! Model and dataset resolution
//!
//! The runner only sees the two resolver traits; the hub implementations read
//! a local directory tree and can be swapped for anything else.

mod dataset;
mod datasets;
mod models;

pub use dataset::{Dataset, DatasetSubset, Row};
pub use datasets::HubDatasetResolver;
pub use models::{HubModelResolver, ModelManifest, MODEL_MANIFEST_FILE};

use std::sync::Arc;

use async_trait::async_trait;
use lema_core::{DatasetParams, LemaResult, ModelParams};

use crate::model::LanguageModel;

/// Resolves a model by name and trust flag
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelResolver: Send + Sync {
    async fn resolve(&self, params: &ModelParams) -> LemaResult<Arc<dyn LanguageModel>>;
}

/// Resolves a dataset split by name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetResolver: Send + Sync {
    async fn resolve(&self, params: &DatasetParams) -> LemaResult<Dataset>;
}

//! Model and dataset parameter groups

use serde::{Deserialize, Serialize};

use crate::error::{LemaError, LemaResult};

/// Text column read by the native framework when none is configured
pub const DEFAULT_TARGET_COL: &str = "text";

/// Dataset split evaluated when none is configured
pub const DEFAULT_SPLIT: &str = "test";

fn default_split() -> String {
    DEFAULT_SPLIT.to_string()
}

/// Identifies one dataset on the dataset hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetParams {
    /// Hub identifier, e.g. `cais/mmlu`
    pub dataset_name: String,

    /// Split to evaluate
    #[serde(default = "default_split")]
    pub split: String,

    /// Restrict evaluation to a single named subset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,
}

impl DatasetParams {
    /// Create params for the default split of a dataset
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            split: default_split(),
            subset: None,
        }
    }

    /// Set the split
    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.split = split.into();
        self
    }

    /// Restrict to one subset
    pub fn with_subset(mut self, subset: impl Into<String>) -> Self {
        self.subset = Some(subset.into());
        self
    }

    pub fn validate(&self) -> LemaResult<()> {
        if self.dataset_name.trim().is_empty() {
            return Err(LemaError::config_field(
                "Dataset name cannot be empty",
                "data.datasets.dataset_name",
            ));
        }
        if self.split.trim().is_empty() {
            return Err(LemaError::config_field(
                format!("Split cannot be empty for dataset '{}'", self.dataset_name),
                "data.datasets.split",
            ));
        }
        if matches!(&self.subset, Some(subset) if subset.trim().is_empty()) {
            return Err(LemaError::config_field(
                format!("Subset cannot be empty for dataset '{}'", self.dataset_name),
                "data.datasets.subset",
            ));
        }
        Ok(())
    }
}

/// The datasets an evaluation runs over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSplitParams {
    /// Datasets to evaluate, in report order
    pub datasets: Vec<DatasetParams>,

    /// Text field used by the native framework
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_col: Option<String>,
}

impl DatasetSplitParams {
    pub fn new(datasets: Vec<DatasetParams>) -> Self {
        Self {
            datasets,
            target_col: None,
        }
    }

    /// Set the target column
    pub fn with_target_col(mut self, target_col: impl Into<String>) -> Self {
        self.target_col = Some(target_col.into());
        self
    }

    /// Configured target column, or [`DEFAULT_TARGET_COL`]
    pub fn target_col(&self) -> &str {
        self.target_col.as_deref().unwrap_or(DEFAULT_TARGET_COL)
    }

    pub fn validate(&self) -> LemaResult<()> {
        if self.datasets.is_empty() {
            return Err(LemaError::config_field(
                "At least one dataset is required",
                "data.datasets",
            ));
        }
        for dataset in &self.datasets {
            dataset.validate()?;
        }
        if matches!(&self.target_col, Some(col) if col.trim().is_empty()) {
            return Err(LemaError::config_field(
                "Target column cannot be empty",
                "data.target_col",
            ));
        }
        Ok(())
    }
}

/// Identifies the model under evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelParams {
    /// Hub identifier, e.g. `openai-community/gpt2`
    pub model_name: String,

    /// Allow models that ship their own loading code
    #[serde(default)]
    pub trust_remote_code: bool,
}

impl ModelParams {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            trust_remote_code: false,
        }
    }

    /// Set the trust flag
    pub fn with_trust_remote_code(mut self, trust: bool) -> Self {
        self.trust_remote_code = trust;
        self
    }

    pub fn validate(&self) -> LemaResult<()> {
        if self.model_name.trim().is_empty() {
            return Err(LemaError::config_field(
                "Model name cannot be empty",
                "model.model_name",
            ));
        }
        Ok(())
    }
}

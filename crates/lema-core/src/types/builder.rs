//! Builder for EvaluationConfig
//!
//! The builder doubles as the on-disk shape of a configuration file:
//! `EvaluationConfig` deserializes through it so that file loading and
//! programmatic construction share one validation path.

use std::path::PathBuf;

use serde::Deserialize;

use super::configs::{EvaluationConfig, EvaluationFramework};
use super::params::{DatasetSplitParams, ModelParams};
use crate::error::{LemaError, LemaResult};

/// Builder for [`EvaluationConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfigBuilder {
    output_dir: Option<PathBuf>,
    data: Option<DatasetSplitParams>,
    model: Option<ModelParams>,
    evaluation_framework: Option<EvaluationFramework>,
    num_samples: Option<usize>,
}

impl EvaluationConfigBuilder {
    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the dataset parameters
    pub fn data(mut self, data: DatasetSplitParams) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the model parameters
    pub fn model(mut self, model: ModelParams) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the evaluation framework
    pub fn evaluation_framework(mut self, framework: EvaluationFramework) -> Self {
        self.evaluation_framework = Some(framework);
        self
    }

    /// Bound the number of evaluated examples
    pub fn num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = Some(num_samples);
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> LemaResult<EvaluationConfig> {
        let config = EvaluationConfig {
            output_dir: self
                .output_dir
                .ok_or_else(|| LemaError::config_field("output_dir is required", "output_dir"))?,
            data: self
                .data
                .ok_or_else(|| LemaError::config_field("data is required", "data"))?,
            model: self
                .model
                .ok_or_else(|| LemaError::config_field("model is required", "model"))?,
            evaluation_framework: self.evaluation_framework.ok_or_else(|| {
                LemaError::config_field(
                    "evaluation_framework is required",
                    "evaluation_framework",
                )
            })?,
            num_samples: self.num_samples,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<EvaluationConfig> for EvaluationConfigBuilder {
    fn from(config: EvaluationConfig) -> Self {
        Self {
            output_dir: Some(config.output_dir),
            data: Some(config.data),
            model: Some(config.model),
            evaluation_framework: Some(config.evaluation_framework),
            num_samples: config.num_samples,
        }
    }
}

impl TryFrom<EvaluationConfigBuilder> for EvaluationConfig {
    type Error = LemaError;

    fn try_from(builder: EvaluationConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatasetParams;

    fn complete() -> EvaluationConfigBuilder {
        EvaluationConfig::builder()
            .output_dir("out")
            .data(DatasetSplitParams::new(vec![DatasetParams::new("mmlu")]))
            .model(ModelParams::new("openai-community/gpt2"))
            .evaluation_framework(EvaluationFramework::LmHarness)
    }

    #[test]
    fn test_build_complete() {
        let config = complete().build().unwrap();
        assert_eq!(config.num_samples(), None);
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let err = EvaluationConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("output_dir"));

        let err = EvaluationConfig::builder()
            .output_dir("out")
            .data(DatasetSplitParams::new(vec![DatasetParams::new("mmlu")]))
            .model(ModelParams::new("gpt2"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("evaluation_framework"));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = complete().num_samples(0).build().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_output_dir_rejected() {
        assert!(complete().output_dir("").build().is_err());
    }

    #[test]
    fn test_empty_dataset_list_rejected() {
        let err = complete()
            .data(DatasetSplitParams::new(Vec::new()))
            .build()
            .unwrap_err();
        assert!(err.is_config());
    }
}

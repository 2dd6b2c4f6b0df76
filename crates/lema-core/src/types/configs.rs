//! Evaluation configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::builder::EvaluationConfigBuilder;
use super::params::{DatasetSplitParams, ModelParams};
use crate::error::{LemaError, LemaResult};

/// Backend used to compute benchmark metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationFramework {
    /// Native next-token accuracy over a target text column
    #[serde(rename = "LEMA", alias = "lema")]
    Lema,
    /// Multiple-choice log-likelihood scoring in the style of lm-evaluation-harness
    #[serde(rename = "LM_HARNESS", alias = "lm_harness")]
    LmHarness,
}

impl EvaluationFramework {
    pub const ALL: [EvaluationFramework; 2] =
        [EvaluationFramework::Lema, EvaluationFramework::LmHarness];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationFramework::Lema => "LEMA",
            EvaluationFramework::LmHarness => "LM_HARNESS",
        }
    }
}

impl fmt::Display for EvaluationFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationFramework {
    type Err = LemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lema" => Ok(EvaluationFramework::Lema),
            "lm_harness" => Ok(EvaluationFramework::LmHarness),
            other => Err(LemaError::config_field(
                format!(
                    "Unknown evaluation framework '{other}'. Valid values are: LEMA, LM_HARNESS"
                ),
                "evaluation_framework",
            )),
        }
    }
}

/// Immutable configuration for one evaluation run
///
/// Built with [`EvaluationConfig::builder`] or deserialized from a file; both
/// paths run the same validation, so a value of this type is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EvaluationConfigBuilder")]
pub struct EvaluationConfig {
    pub(crate) output_dir: PathBuf,
    pub(crate) data: DatasetSplitParams,
    pub(crate) model: ModelParams,
    pub(crate) evaluation_framework: EvaluationFramework,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) num_samples: Option<usize>,
}

impl EvaluationConfig {
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// Directory the report is written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn data(&self) -> &DatasetSplitParams {
        &self.data
    }

    pub fn model(&self) -> &ModelParams {
        &self.model
    }

    pub fn evaluation_framework(&self) -> EvaluationFramework {
        self.evaluation_framework
    }

    /// Upper bound on evaluated examples; `None` evaluates everything
    pub fn num_samples(&self) -> Option<usize> {
        self.num_samples
    }

    /// Start a builder pre-filled with this configuration
    pub fn to_builder(&self) -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::from(self.clone())
    }

    pub(crate) fn validate(&self) -> LemaResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(LemaError::config_field(
                "Output directory cannot be empty",
                "output_dir",
            ));
        }
        self.data.validate()?;
        self.model.validate()?;
        if self.num_samples == Some(0) {
            return Err(LemaError::config_field(
                "num_samples must be at least 1",
                "num_samples",
            ));
        }
        Ok(())
    }
}

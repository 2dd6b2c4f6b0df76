//! LEMA: evaluate language models on benchmark datasets
//!
//! Build an [`types::EvaluationConfig`], then call [`evaluate`] (or the
//! framework-specific [`evaluate_lema`] / [`evaluate_lm_harness`]). Metrics
//! are written to `<output_dir>/eval.json`.
//!
//! ```rust,ignore
//! use lema::types::{
//!     DatasetParams, DatasetSplitParams, EvaluationConfig, EvaluationFramework, ModelParams,
//! };
//!
//! let config = EvaluationConfig::builder()
//!     .output_dir("out")
//!     .data(DatasetSplitParams::new(vec![DatasetParams::new("cais/mmlu")]))
//!     .model(ModelParams::new("openai-community/gpt2").with_trust_remote_code(true))
//!     .evaluation_framework(EvaluationFramework::Lema)
//!     .num_samples(4)
//!     .build()?;
//! lema::evaluate_lema(&config).await?;
//! ```

pub use lema_core::{load_evaluation_config, types, HubSettings, LemaError, LemaResult};
pub use lema_eval::{
    evaluate, evaluate_lema, evaluate_lm_harness, EvaluationReport, Evaluator, SAVE_FILENAME_JSON,
};

/// Lower-level building blocks for custom resolvers and models
pub mod eval {
    pub use lema_eval::{backend, hub, metrics, model, report, runner};
}

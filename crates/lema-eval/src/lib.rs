//! LEMA evaluation runner
//!
//! Evaluates a language model on one or more datasets and saves the metrics
//! to `<output_dir>/eval.json`.
//!
//! # Features
//!
//! - **Two frameworks**: native next-token accuracy (`LEMA`) and
//!   multiple-choice log-likelihood scoring with harness-style metrics
//!   (`LM_HARNESS`)
//! - **Pluggable resolution**: models and datasets come from
//!   [`ModelResolver`] / [`DatasetResolver`] implementations, by default a
//!   local hub directory
//! - **Atomic reports**: the JSON report is written through a temporary file
//!   and renamed into place
//!
//! # Example
//!
//! ```rust,ignore
//! use lema_core::load_evaluation_config;
//! use lema_eval::evaluate;
//!
//! let config = load_evaluation_config("eval.yaml")?;
//! let report = evaluate(&config).await?;
//! ```

pub mod backend;
pub mod hub;
pub mod metrics;
pub mod model;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use backend::{backend_for, EvaluationBackend, HarnessBackend, NativeBackend};
pub use hub::{
    Dataset, DatasetResolver, DatasetSubset, HubDatasetResolver, HubModelResolver, ModelResolver,
    Row,
};
pub use metrics::{MetricMap, MetricValue};
pub use model::{LanguageModel, Loglikelihood, OpenAiCompletionsModel, TokenPredictions};
pub use report::{generate_report, EvaluationReport, ReportFormat};
pub use runner::{
    evaluate, evaluate_lema, evaluate_lm_harness, output_path, EvalProgress, Evaluator,
    SAVE_FILENAME_JSON,
};

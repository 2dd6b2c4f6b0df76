//! Core types for LEMA model evaluation
//!
//! Holds the evaluation configuration record and its parameter groups, the
//! shared error type, and configuration loading. Nothing in this crate
//! performs an evaluation; see `lema-eval` for the runner.

pub mod config;
pub mod error;
pub mod types;

pub use config::{load_evaluation_config, HubSettings, LogFormat, LoggingConfig};
pub use error::{LemaError, LemaResult, ResourceKind};
pub use types::{
    DatasetParams, DatasetSplitParams, EvaluationConfig, EvaluationConfigBuilder,
    EvaluationFramework, ModelParams,
};

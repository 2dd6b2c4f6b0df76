//! Configuration types for evaluation runs

mod builder;
pub mod configs;
mod params;

pub use builder::EvaluationConfigBuilder;
pub use configs::{EvaluationConfig, EvaluationFramework};
pub use params::{
    DatasetParams, DatasetSplitParams, ModelParams, DEFAULT_SPLIT, DEFAULT_TARGET_COL,
};

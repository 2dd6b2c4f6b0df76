//! Evaluation runner components
//!
//! This module wires resolvers, backends and report persistence together.

mod evaluator;

pub use evaluator::{
    evaluate, evaluate_lema, evaluate_lm_harness, output_path, EvalProgress, Evaluator,
    ProgressCallback, SAVE_FILENAME_JSON,
};

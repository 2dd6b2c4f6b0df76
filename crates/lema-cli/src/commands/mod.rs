//! CLI commands

pub mod evaluate;
pub mod report;
pub mod validate;

pub use evaluate::EvaluateArgs;

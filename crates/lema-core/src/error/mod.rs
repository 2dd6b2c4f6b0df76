//! Error types for LEMA
//!
//! A single error enum shared by every crate in the workspace. Configuration
//! errors surface at construction time; resolution, dataset, model and IO
//! errors surface from an evaluation run.

mod constructors;
mod conversions;
mod types;

pub use types::{LemaError, LemaResult, ResourceKind};

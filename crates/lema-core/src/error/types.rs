//! Core error types for LEMA evaluation

use std::fmt;

use thiserror::Error;

/// Result type alias for LEMA operations
pub type LemaResult<T> = Result<T, LemaError>;

/// Kind of external resource a resolution error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Model,
    Dataset,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Model => write!(f, "model"),
            ResourceKind::Dataset => write!(f, "dataset"),
        }
    }
}

/// Main error type for LEMA evaluation
///
/// Configuration errors are raised while building or loading an
/// [`EvaluationConfig`](crate::types::EvaluationConfig); every other variant
/// is raised by the evaluation run itself and is never retried.
#[derive(Error, Debug, Clone)]
pub enum LemaError {
    /// Missing or invalid configuration fields
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// A model or dataset could not be resolved
    #[error("Failed to resolve {kind} '{name}': {message}")]
    Resolution {
        kind: ResourceKind,
        name: String,
        message: String,
    },

    /// Dataset rows do not have the shape a backend requires
    #[error("Dataset error in '{dataset}': {message}")]
    Dataset { dataset: String, message: String },

    /// Model request or response errors
    #[error("Model error: {message}")]
    Model {
        message: String,
        model: Option<String>,
        status_code: Option<u16>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },
}

impl LemaError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LemaError::Config { .. } => "LEMA_CONFIG",
            LemaError::Resolution { .. } => "LEMA_RESOLUTION",
            LemaError::Dataset { .. } => "LEMA_DATASET",
            LemaError::Model { .. } => "LEMA_MODEL",
            LemaError::Io { .. } => "LEMA_IO",
            LemaError::Json { .. } => "LEMA_JSON",
        }
    }

    /// Whether this error was raised while validating configuration
    pub fn is_config(&self) -> bool {
        matches!(self, LemaError::Config { .. })
    }

    /// Whether this error was raised while resolving a model or dataset
    pub fn is_resolution(&self) -> bool {
        matches!(self, LemaError::Resolution { .. })
    }

    /// Additional context, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            LemaError::Config { context, .. } => context.as_deref(),
            LemaError::Io { path, .. } => path.as_deref(),
            LemaError::Model { model, .. } => model.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_display() {
        let err = LemaError::resolution(ResourceKind::Dataset, "cais/mmlu", "no split 'test'");
        assert_eq!(
            err.to_string(),
            "Failed to resolve dataset 'cais/mmlu': no split 'test'"
        );
        assert!(err.is_resolution());
        assert_eq!(err.error_code(), "LEMA_RESOLUTION");
    }

    #[test]
    fn test_config_field() {
        let err = LemaError::config_field("num_samples must be at least 1", "num_samples");
        assert!(err.is_config());
        match err {
            LemaError::Config { field, .. } => assert_eq!(field.as_deref(), Some("num_samples")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_context_is_path() {
        let err = LemaError::io_with_path("permission denied", "/root/out");
        assert_eq!(err.context(), Some("/root/out"));
    }
}

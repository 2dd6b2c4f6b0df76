//! Constructor methods for LemaError

use super::types::{LemaError, ResourceKind};

impl LemaError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create a configuration error for a specific field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
            context: Some(context.into()),
        }
    }

    /// Create a resolution error for a model or dataset
    pub fn resolution(
        kind: ResourceKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a dataset shape error
    pub fn dataset(dataset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset {
            dataset: dataset.into(),
            message: message.into(),
        }
    }

    /// Create a new model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            model: None,
            status_code: None,
        }
    }

    /// Create a model error carrying the model name and HTTP status
    pub fn model_with_status(
        message: impl Into<String>,
        model: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Model {
            message: message.into(),
            model: Some(model.into()),
            status_code: Some(status_code),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with the offending path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }
}

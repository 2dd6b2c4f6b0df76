//! Conversions from foreign error types

use super::types::LemaError;

impl From<std::io::Error> for LemaError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for LemaError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

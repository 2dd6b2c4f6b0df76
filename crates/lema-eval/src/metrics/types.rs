//! Metric value types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-dataset mapping of metric name to value
pub type MetricMap = BTreeMap<String, MetricValue>;

/// A numeric metric or a descriptive field such as `alias`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(value) => Some(*value),
            MetricValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Number(_) => None,
            MetricValue::Text(text) => Some(text),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(value) => write!(f, "{:.4}", value),
            MetricValue::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        let mut metrics = MetricMap::new();
        metrics.insert("acc,none".to_string(), 0.25.into());
        metrics.insert("alias".to_string(), "mmlu".into());

        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"acc,none":0.25,"alias":"mmlu"}"#);

        let parsed: MetricMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["acc,none"].as_f64(), Some(0.25));
        assert_eq!(parsed["alias"].as_str(), Some("mmlu"));
    }

    #[test]
    fn test_integer_json_reads_as_number() {
        let parsed: MetricValue = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, MetricValue::Number(0.0));
    }
}

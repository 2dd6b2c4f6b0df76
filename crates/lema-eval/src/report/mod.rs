//! Evaluation reports
//!
//! An [`EvaluationReport`] maps each dataset name to its metric mapping. It
//! is persisted as JSON and can be rendered as Markdown or a terminal table.

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lema_core::{LemaError, LemaResult};
use serde::{Deserialize, Serialize};

use crate::metrics::{MetricMap, MetricValue};

/// Dataset name to metric mapping, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationReport {
    datasets: BTreeMap<String, MetricMap>,
}

impl EvaluationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metrics of one dataset, replacing any earlier entry
    pub fn insert(&mut self, dataset: impl Into<String>, metrics: MetricMap) {
        self.datasets.insert(dataset.into(), metrics);
    }

    pub fn get(&self, dataset: &str) -> Option<&MetricMap> {
        self.datasets.get(dataset)
    }

    /// A single metric of a single dataset
    pub fn metric(&self, dataset: &str, metric: &str) -> Option<&MetricValue> {
        self.datasets.get(dataset)?.get(metric)
    }

    /// Entries in dataset-name order
    pub fn datasets(&self) -> impl Iterator<Item = (&str, &MetricMap)> {
        self.datasets
            .iter()
            .map(|(name, metrics)| (name.as_str(), metrics))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Read a report previously written as JSON
    pub fn load(path: impl AsRef<Path>) -> LemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LemaError::io_with_path(
                format!("Failed to read report: {}", e),
                path.display().to_string(),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            LemaError::json(format!("Invalid report {}: {}", path.display(), e))
        })
    }
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Json,
    Markdown,
    #[default]
    Table,
}

impl FromStr for ReportFormat {
    type Err = LemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "table" => Ok(ReportFormat::Table),
            other => Err(LemaError::config(format!(
                "Unknown report format '{}', expected json, markdown or table",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Table => write!(f, "table"),
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &EvaluationReport, format: ReportFormat) -> LemaResult<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => Ok(MarkdownReporter::generate(report)),
        ReportFormat::Table => Ok(generate_table(report)),
    }
}

/// Generate a simple table report for terminal output
fn generate_table(report: &EvaluationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<70}\n", "= LEMA Evaluation Results "));
    output.push_str(&format!(
        "{:<30} {:<24} {:>14}\n",
        "Dataset", "Metric", "Value"
    ));
    output.push_str(&format!("{:-<70}\n", ""));

    for (dataset, metrics) in report.datasets() {
        let dataset_name = if dataset.len() > 28 {
            format!("{}...", dataset.chars().take(25).collect::<String>())
        } else {
            dataset.to_string()
        };

        for (index, (metric, value)) in metrics.iter().enumerate() {
            let label = if index == 0 { dataset_name.as_str() } else { "" };
            output.push_str(&format!(
                "{:<30} {:<24} {:>14}\n",
                label,
                metric,
                value.to_string()
            ));
        }
    }

    output.push_str(&format!("{:=<70}\n", ""));
    output
}

#[cfg(test)]
pub(crate) fn sample_report() -> EvaluationReport {
    let mut mmlu = MetricMap::new();
    mmlu.insert("acc,none".to_string(), 0.285.into());
    mmlu.insert("acc_stderr,none".to_string(), 0.0299.into());
    mmlu.insert("alias".to_string(), "cais/mmlu".into());

    let mut native = MetricMap::new();
    native.insert("accuracy".to_string(), 0.0.into());

    let mut report = EvaluationReport::new();
    report.insert("cais/mmlu", mmlu);
    report.insert("wikitext", native);
    report
}

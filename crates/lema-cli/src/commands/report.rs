//! `lema report`

use std::path::Path;

use anyhow::{Context, Result};
use lema_eval::{generate_report, EvaluationReport, ReportFormat};

/// Show an evaluation report from a previous run
pub fn run(input: &Path, format: ReportFormat) -> Result<()> {
    let report = EvaluationReport::load(input)
        .with_context(|| format!("Failed to load report {}", input.display()))?;

    println!("{}", generate_report(&report, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_formats() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eval.json");
        std::fs::write(&path, r#"{"cais/mmlu": {"accuracy": 0.25}}"#).unwrap();

        for format in [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Table] {
            assert!(run(&path, format).is_ok());
        }
    }

    #[test]
    fn test_report_not_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eval.json");
        std::fs::write(&path, "not json").unwrap();

        let err = run(&path, ReportFormat::Table).unwrap_err();
        assert!(err.to_string().contains("Failed to load report"));
    }
}

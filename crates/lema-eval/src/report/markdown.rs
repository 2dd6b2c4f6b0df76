//! Markdown report generation

use std::collections::BTreeSet;

use super::EvaluationReport;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    ///
    /// One row per dataset and one column per metric name seen in any
    /// dataset; metrics a dataset does not report are left blank.
    pub fn generate(report: &EvaluationReport) -> String {
        let mut md = String::new();

        md.push_str("# LEMA Evaluation Report\n\n");

        if report.is_empty() {
            md.push_str("_No datasets were evaluated._\n");
            return md;
        }

        let columns: BTreeSet<&str> = report
            .datasets()
            .flat_map(|(_, metrics)| metrics.keys().map(String::as_str))
            .collect();

        md.push_str("| Dataset |");
        for column in &columns {
            md.push_str(&format!(" {} |", column));
        }
        md.push('\n');

        md.push_str("|---------|");
        for _ in &columns {
            md.push_str("-------|");
        }
        md.push('\n');

        for (dataset, metrics) in report.datasets() {
            md.push_str(&format!("| {} |", dataset));
            for column in &columns {
                match metrics.get(*column) {
                    Some(value) => md.push_str(&format!(" {} |", value)),
                    None => md.push_str("  |"),
                }
            }
            md.push('\n');
        }

        md
    }
}

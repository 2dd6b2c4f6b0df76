//! JSON report generation

use std::io::Write;
use std::path::{Path, PathBuf};

use lema_core::{LemaError, LemaResult};
use tempfile::NamedTempFile;

use super::EvaluationReport;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(report: &EvaluationReport) -> LemaResult<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(json)
    }

    /// Generate a compact JSON report (no pretty printing)
    pub fn generate_compact(report: &EvaluationReport) -> LemaResult<String> {
        let json = serde_json::to_string(report)?;
        Ok(json)
    }

    /// Write the report to `dir/file_name`, creating `dir` as needed
    ///
    /// The JSON is written to a temporary file in `dir` and renamed over the
    /// target, so readers see either the previous file or the complete new
    /// one.
    pub fn write_atomic(
        report: &EvaluationReport,
        dir: &Path,
        file_name: &str,
    ) -> LemaResult<PathBuf> {
        let json = Self::generate(report)?;

        std::fs::create_dir_all(dir).map_err(|e| {
            LemaError::io_with_path(
                format!("Failed to create output directory: {}", e),
                dir.display().to_string(),
            )
        })?;

        let target = dir.join(file_name);
        let io_error = |e: std::io::Error| {
            LemaError::io_with_path(
                format!("Failed to write report: {}", e),
                target.display().to_string(),
            )
        };

        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        // Temp files are created 0600; reports are readable like any other output.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(io_error)?;
        }
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&target).map_err(|e| io_error(e.error))?;

        Ok(target)
    }
}

//! Dataset resolution from a local hub directory
//!
//! Layout: every `<split>.jsonl` file below `<datasets_dir>/<dataset_name>/`
//! is one subset, named by its directory relative to the dataset root.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use lema_core::{DatasetParams, LemaError, LemaResult, ResourceKind};
use walkdir::WalkDir;

use super::dataset::{Dataset, DatasetSubset, Row};
use super::DatasetResolver;

/// Resolver for datasets stored as JSON Lines under a hub directory
pub struct HubDatasetResolver {
    datasets_dir: PathBuf,
}

impl HubDatasetResolver {
    pub fn new(datasets_dir: impl AsRef<Path>) -> Self {
        Self {
            datasets_dir: datasets_dir.as_ref().to_path_buf(),
        }
    }

    pub fn datasets_dir(&self) -> &Path {
        &self.datasets_dir
    }

    /// Directory holding a dataset, rejecting names that escape the hub
    fn dataset_root(&self, dataset_name: &str) -> LemaResult<PathBuf> {
        let relative = Path::new(dataset_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(LemaError::resolution(
                ResourceKind::Dataset,
                dataset_name,
                "dataset name must be a relative hub identifier",
            ));
        }
        Ok(self.datasets_dir.join(relative))
    }

    /// Find `(subset name, file)` pairs for a split, sorted by subset name
    fn split_files(
        &self,
        root: &Path,
        params: &DatasetParams,
    ) -> LemaResult<Vec<(String, PathBuf)>> {
        let file_name = format!("{}.jsonl", params.split);
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                LemaError::io_with_path(
                    format!("Failed to scan dataset directory: {}", e),
                    e.path().unwrap_or(root).display().to_string(),
                )
            })?;
            let path = entry.path();
            if !path.is_file() || entry.file_name().to_str() != Some(file_name.as_str()) {
                continue;
            }

            let subset = path
                .parent()
                .and_then(|parent| parent.strip_prefix(root).ok())
                .map(|relative| {
                    relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| params.dataset_name.clone());

            files.push((subset, path.to_path_buf()));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }

    async fn load_rows(&self, dataset_name: &str, path: &Path) -> LemaResult<Vec<Row>> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            LemaError::io_with_path(
                format!("Failed to read dataset file: {}", e),
                path.display().to_string(),
            )
        })?;

        parse_jsonl(dataset_name, path, &content)
    }
}

fn parse_jsonl(dataset_name: &str, path: &Path, content: &str) -> LemaResult<Vec<Row>> {
    let mut rows = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
            LemaError::dataset(
                dataset_name,
                format!("{}:{}: {}", path.display(), line_number + 1, e),
            )
        })?;
        match value {
            serde_json::Value::Object(row) => rows.push(row),
            _ => {
                return Err(LemaError::dataset(
                    dataset_name,
                    format!("{}:{}: expected a JSON object", path.display(), line_number + 1),
                ));
            }
        }
    }
    Ok(rows)
}

#[async_trait]
impl DatasetResolver for HubDatasetResolver {
    async fn resolve(&self, params: &DatasetParams) -> LemaResult<Dataset> {
        let root = self.dataset_root(&params.dataset_name)?;
        if !root.is_dir() {
            return Err(LemaError::resolution(
                ResourceKind::Dataset,
                &params.dataset_name,
                format!("not found in hub at {}", root.display()),
            ));
        }

        let mut files = self.split_files(&root, params)?;
        if let Some(subset) = &params.subset {
            files.retain(|(name, _)| name == subset);
        }
        if files.is_empty() {
            let message = match &params.subset {
                Some(subset) => format!("no '{}' split for subset '{}'", params.split, subset),
                None => format!("no '{}' split", params.split),
            };
            return Err(LemaError::resolution(
                ResourceKind::Dataset,
                &params.dataset_name,
                message,
            ));
        }

        let mut subsets = Vec::with_capacity(files.len());
        for (name, path) in files {
            let rows = self.load_rows(&params.dataset_name, &path).await?;
            subsets.push(DatasetSubset::new(name, rows));
        }

        tracing::debug!(
            dataset = %params.dataset_name,
            split = %params.split,
            subsets = subsets.len(),
            "Resolved dataset"
        );
        Ok(Dataset::new(params.dataset_name.clone(), subsets))
    }
}

//! Evaluation runner
//!
//! Resolves the model and datasets named by an [`EvaluationConfig`], computes
//! each dataset's metrics with the selected backend, and saves the report to
//! `<output_dir>/eval.json`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lema_core::{EvaluationConfig, EvaluationFramework, HubSettings, LemaError, LemaResult};
use tracing::instrument;

use crate::backend::{backend_for, EvaluationBackend, HarnessBackend, NativeBackend};
use crate::hub::{Dataset, DatasetResolver, HubDatasetResolver, HubModelResolver, ModelResolver};
use crate::report::{EvaluationReport, JsonReporter};

/// File name of the saved report inside `output_dir`
pub const SAVE_FILENAME_JSON: &str = "eval.json";

/// Callback for progress updates during evaluation
pub type ProgressCallback = Box<dyn Fn(EvalProgress) + Send + Sync>;

/// Progress update during evaluation
#[derive(Debug, Clone)]
pub struct EvalProgress {
    /// Current dataset index (0-based)
    pub current: usize,
    /// Total number of datasets
    pub total: usize,
    /// Current dataset name
    pub dataset: String,
    /// Status message
    pub message: String,
}

/// Path the report of `config` is saved to
pub fn output_path(config: &EvaluationConfig) -> PathBuf {
    config.output_dir().join(SAVE_FILENAME_JSON)
}

/// Runs evaluations against injected model and dataset resolvers
pub struct Evaluator {
    models: Arc<dyn ModelResolver>,
    datasets: Arc<dyn DatasetResolver>,
    progress_callback: Option<ProgressCallback>,
}

impl Evaluator {
    pub fn new(models: Arc<dyn ModelResolver>, datasets: Arc<dyn DatasetResolver>) -> Self {
        Self {
            models,
            datasets,
            progress_callback: None,
        }
    }

    /// Evaluator backed by the local model and dataset hubs
    pub fn from_settings(settings: &HubSettings) -> LemaResult<Self> {
        let models = HubModelResolver::new(
            &settings.models_dir,
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        let datasets = HubDatasetResolver::new(&settings.datasets_dir);
        Ok(Self::new(Arc::new(models), Arc::new(datasets)))
    }

    /// Set progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    /// Evaluate with the backend selected by `config.evaluation_framework()`
    pub async fn evaluate(&self, config: &EvaluationConfig) -> LemaResult<EvaluationReport> {
        let backend = backend_for(config.evaluation_framework());
        self.run(backend.as_ref(), config).await
    }

    /// Evaluate with the native backend regardless of the configured framework
    pub async fn evaluate_lema(&self, config: &EvaluationConfig) -> LemaResult<EvaluationReport> {
        warn_on_mismatch(config, EvaluationFramework::Lema);
        self.run(&NativeBackend, config).await
    }

    /// Evaluate with the harness backend regardless of the configured framework
    pub async fn evaluate_lm_harness(
        &self,
        config: &EvaluationConfig,
    ) -> LemaResult<EvaluationReport> {
        warn_on_mismatch(config, EvaluationFramework::LmHarness);
        self.run(&HarnessBackend, config).await
    }

    /// Resolve, evaluate every dataset, then save the report
    ///
    /// Nothing is written unless every dataset was evaluated.
    #[instrument(
        skip_all,
        fields(model = %config.model().model_name, framework = %backend.framework())
    )]
    pub async fn run(
        &self,
        backend: &dyn EvaluationBackend,
        config: &EvaluationConfig,
    ) -> LemaResult<EvaluationReport> {
        tracing::info!(
            datasets = config.data().datasets.len(),
            num_samples = ?config.num_samples(),
            "Starting evaluation"
        );

        let model = self.models.resolve(config.model()).await?;
        tracing::debug!(model = model.name(), "Resolved model");

        let datasets = self.resolve_datasets(config).await?;

        let total = datasets.len();
        let mut report = EvaluationReport::new();
        for (index, (name, dataset)) in datasets.iter().enumerate() {
            self.report_progress(index, total, name, "Evaluating");

            let metrics = backend
                .evaluate_dataset(model.as_ref(), dataset, config)
                .await?;
            tracing::info!(dataset = %name, metrics = ?metrics, "Dataset evaluated");

            report.insert(name.clone(), metrics);
        }

        let path = save_report(&report, config).await?;
        tracing::info!(path = %path.display(), "Saved evaluation report");

        Ok(report)
    }

    async fn resolve_datasets(
        &self,
        config: &EvaluationConfig,
    ) -> LemaResult<Vec<(String, Dataset)>> {
        let mut resolved = Vec::with_capacity(config.data().datasets.len());
        for params in &config.data().datasets {
            let dataset = self.datasets.resolve(params).await?;
            tracing::debug!(
                dataset = %params.dataset_name,
                split = %params.split,
                subsets = dataset.subsets.len(),
                rows = dataset.len(),
                "Resolved dataset"
            );
            resolved.push((params.dataset_name.clone(), dataset));
        }
        Ok(resolved)
    }

    fn report_progress(&self, current: usize, total: usize, dataset: &str, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(EvalProgress {
                current,
                total,
                dataset: dataset.to_string(),
                message: message.to_string(),
            });
        }
    }
}

fn warn_on_mismatch(config: &EvaluationConfig, framework: EvaluationFramework) {
    if config.evaluation_framework() != framework {
        tracing::warn!(
            configured = %config.evaluation_framework(),
            running = %framework,
            "Configured framework differs from the requested backend"
        );
    }
}

async fn save_report(report: &EvaluationReport, config: &EvaluationConfig) -> LemaResult<PathBuf> {
    let report = report.clone();
    let dir = config.output_dir().to_path_buf();
    tokio::task::spawn_blocking(move || {
        JsonReporter::write_atomic(&report, &dir, SAVE_FILENAME_JSON)
    })
    .await
    .map_err(|e| LemaError::io(format!("Report writer task failed: {}", e)))?
}

/// Evaluate `config` against the hubs configured in the environment
pub async fn evaluate(config: &EvaluationConfig) -> LemaResult<EvaluationReport> {
    Evaluator::from_settings(&HubSettings::from_env()?)?
        .evaluate(config)
        .await
}

/// [`evaluate`] with the native backend
pub async fn evaluate_lema(config: &EvaluationConfig) -> LemaResult<EvaluationReport> {
    Evaluator::from_settings(&HubSettings::from_env()?)?
        .evaluate_lema(config)
        .await
}

/// [`evaluate`] with the harness backend
pub async fn evaluate_lm_harness(config: &EvaluationConfig) -> LemaResult<EvaluationReport> {
    Evaluator::from_settings(&HubSettings::from_env()?)?
        .evaluate_lm_harness(config)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FirstChoiceModel;
    use crate::hub::{DatasetSubset, MockDatasetResolver, MockModelResolver, Row};
    use crate::model::LanguageModel;
    use lema_core::{DatasetParams, DatasetSplitParams, ModelParams, ResourceKind};
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn config(output_dir: &Path, framework: EvaluationFramework) -> EvaluationConfig {
        EvaluationConfig::builder()
            .output_dir(output_dir)
            .data(DatasetSplitParams::new(vec![DatasetParams::new("cais/mmlu")]))
            .model(ModelParams::new("openai-community/gpt2"))
            .evaluation_framework(framework)
            .num_samples(4)
            .build()
            .unwrap()
    }

    fn mmlu_rows() -> Vec<Row> {
        (0..4)
            .map(|i| {
                json!({
                    "question": "Which option?",
                    "choices": ["w", "x", "y", "z"],
                    "answer": if i < 2 { 0 } else { 1 },
                    "text": "one two three"
                })
                .as_object()
                .unwrap()
                .clone()
            })
            .collect()
    }

    fn model_resolver() -> MockModelResolver {
        let mut models = MockModelResolver::new();
        models
            .expect_resolve()
            .returning(|_| Ok(Arc::new(FirstChoiceModel) as Arc<dyn LanguageModel>));
        models
    }

    fn dataset_resolver() -> MockDatasetResolver {
        let mut datasets = MockDatasetResolver::new();
        datasets.expect_resolve().returning(|params| {
            Ok(Dataset::new(
                params.dataset_name.clone(),
                vec![DatasetSubset::new("anatomy", mmlu_rows())],
            ))
        });
        datasets
    }

    fn evaluator() -> Evaluator {
        Evaluator::new(Arc::new(model_resolver()), Arc::new(dataset_resolver()))
    }

    #[tokio::test]
    async fn test_native_report_written() {
        let root = TempDir::new().unwrap();
        let config = config(&root.path().join("out"), EvaluationFramework::Lema);

        let report = evaluator().evaluate(&config).await.unwrap();

        assert_eq!(
            report.metric("cais/mmlu", "accuracy").and_then(|v| v.as_f64()),
            Some(0.0)
        );
        let saved = EvaluationReport::load(output_path(&config)).unwrap();
        assert_eq!(saved, report);
    }

    #[tokio::test]
    async fn test_harness_report_written() {
        let root = TempDir::new().unwrap();
        let config = config(root.path(), EvaluationFramework::LmHarness);

        let report = evaluator().evaluate(&config).await.unwrap();

        let metrics = report.get("cais/mmlu").unwrap();
        assert_eq!(metrics["acc,none"].as_f64(), Some(0.5));
        assert_eq!(metrics["alias"].as_str(), Some("cais/mmlu"));
        assert!(root.path().join(SAVE_FILENAME_JSON).is_file());
    }

    #[tokio::test]
    async fn test_entry_point_overrides_configured_framework() {
        let root = TempDir::new().unwrap();
        let config = config(root.path(), EvaluationFramework::Lema);

        let report = evaluator().evaluate_lm_harness(&config).await.unwrap();
        assert!(report.metric("cais/mmlu", "acc,none").is_some());

        let report = evaluator().evaluate_lema(&config).await.unwrap();
        assert!(report.metric("cais/mmlu", "accuracy").is_some());
    }

    #[tokio::test]
    async fn test_creates_nested_output_dir() {
        let root = TempDir::new().unwrap();
        let output_dir = root.path().join("nested").join("dir");
        let config = config(&output_dir, EvaluationFramework::Lema);

        evaluator().evaluate(&config).await.unwrap();

        assert!(output_dir.join("eval.json").is_file());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_report() {
        let root = TempDir::new().unwrap();
        let config = config(root.path(), EvaluationFramework::Lema);
        std::fs::write(output_path(&config), "{\"stale\": {}}").unwrap();

        evaluator().evaluate(&config).await.unwrap();
        evaluator().evaluate(&config).await.unwrap();

        let saved = EvaluationReport::load(output_path(&config)).unwrap();
        assert!(saved.get("stale").is_none());
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn test_model_resolution_failure_writes_nothing() {
        let root = TempDir::new().unwrap();
        let output_dir = root.path().join("out");
        let config = config(&output_dir, EvaluationFramework::Lema);

        let mut models = MockModelResolver::new();
        models.expect_resolve().returning(|params| {
            Err(LemaError::resolution(
                ResourceKind::Model,
                &params.model_name,
                "not found",
            ))
        });
        let mut datasets = MockDatasetResolver::new();
        datasets.expect_resolve().times(0);

        let err = Evaluator::new(Arc::new(models), Arc::new(datasets))
            .evaluate(&config)
            .await
            .err()
            .unwrap();

        assert!(err.is_resolution());
        assert!(!output_dir.exists());
    }

    #[tokio::test]
    async fn test_dataset_resolution_failure_writes_nothing() {
        let root = TempDir::new().unwrap();
        let output_dir = root.path().join("out");
        let config = config(&output_dir, EvaluationFramework::LmHarness);

        let mut datasets = MockDatasetResolver::new();
        datasets.expect_resolve().returning(|params| {
            Err(LemaError::resolution(
                ResourceKind::Dataset,
                &params.dataset_name,
                "no split 'test'",
            ))
        });

        let err = Evaluator::new(Arc::new(model_resolver()), Arc::new(datasets))
            .evaluate(&config)
            .await
            .err()
            .unwrap();

        assert!(err.is_resolution());
        assert!(!output_dir.exists());
    }

    #[tokio::test]
    async fn test_progress_reported_per_dataset() {
        let root = TempDir::new().unwrap();
        let config = EvaluationConfig::builder()
            .output_dir(root.path())
            .data(DatasetSplitParams::new(vec![
                DatasetParams::new("cais/mmlu"),
                DatasetParams::new("wikitext"),
            ]))
            .model(ModelParams::new("gpt2"))
            .evaluation_framework(EvaluationFramework::Lema)
            .build()
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut evaluator = evaluator();
        evaluator.set_progress_callback(Box::new(move |progress| {
            sink.lock()
                .unwrap()
                .push((progress.current, progress.total, progress.dataset));
        }));

        let report = evaluator.evaluate(&config).await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (0, 2, "cais/mmlu".to_string()),
                (1, 2, "wikitext".to_string())
            ]
        );
    }

    #[test]
    fn test_output_path() {
        let config = config(Path::new("/tmp/lema"), EvaluationFramework::Lema);
        assert_eq!(output_path(&config), PathBuf::from("/tmp/lema/eval.json"));
    }
}

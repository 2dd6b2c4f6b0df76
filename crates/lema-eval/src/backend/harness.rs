//! Harness framework: multiple-choice log-likelihood scoring
//!
//! Each dataset subset is a task. A document is correct when its answer
//! choice has the highest log-likelihood. Tasks report `acc` and
//! `acc_stderr`; a dataset of several tasks is reported as a group with a
//! size-weighted accuracy and pooled standard error. Metric names carry the
//! filter suffix (`acc,none`) and the entry carries an `alias`.

use async_trait::async_trait;
use lema_core::{EvaluationConfig, EvaluationFramework, LemaError, LemaResult};

use super::multiple_choice::{description, MultipleChoiceDoc};
use super::EvaluationBackend;
use crate::hub::{Dataset, DatasetSubset};
use crate::metrics::stats::{mean, mean_stderr, pooled_sample_stderr, weighted_mean};
use crate::metrics::{MetricMap, MetricValue};
use crate::model::LanguageModel;

/// Filter name appended to every metric key
pub const FILTER_NONE: &str = "none";

/// Value reported when a standard error is undefined
const NOT_AVAILABLE: &str = "N/A";

/// Accuracy of one task
#[derive(Debug, Clone, PartialEq)]
struct TaskScore {
    size: usize,
    acc: f64,
    acc_stderr: Option<f64>,
}

impl TaskScore {
    fn from_outcomes(outcomes: &[f64]) -> Self {
        Self {
            size: outcomes.len(),
            acc: mean(outcomes),
            acc_stderr: mean_stderr(outcomes),
        }
    }
}

/// Combine task scores into one group score
fn aggregate(tasks: &[TaskScore]) -> TaskScore {
    let sizes: Vec<usize> = tasks.iter().map(|t| t.size).collect();
    let accs: Vec<f64> = tasks.iter().map(|t| t.acc).collect();
    let stderrs: Vec<f64> = tasks.iter().map(|t| t.acc_stderr.unwrap_or(0.0)).collect();

    TaskScore {
        size: sizes.iter().sum(),
        acc: weighted_mean(&accs, &sizes),
        acc_stderr: pooled_sample_stderr(&stderrs, &sizes),
    }
}

fn metric_key(metric: &str) -> String {
    format!("{},{}", metric, FILTER_NONE)
}

/// Backend for [`EvaluationFramework::LmHarness`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HarnessBackend;

impl HarnessBackend {
    /// Score the first `limit` documents of a subset, 1.0 per correct answer
    async fn score_subset(
        &self,
        model: &dyn LanguageModel,
        dataset: &Dataset,
        subset: &DatasetSubset,
        limit: usize,
    ) -> LemaResult<Vec<f64>> {
        let mut outcomes = Vec::new();
        for (index, row) in subset.rows.iter().take(limit).enumerate() {
            let doc = MultipleChoiceDoc::from_row(row).map_err(|message| {
                LemaError::dataset(
                    &dataset.name,
                    format!("{}[{}]: {}", subset.name, index, message),
                )
            })?;

            let subject = doc.subject.as_deref().unwrap_or(subset.leaf_name());
            let context = format!("{}{}", description(subject), doc.prompt());

            let mut best: Option<(usize, f64)> = None;
            for (choice, continuation) in doc.continuations().iter().enumerate() {
                let scored = model.loglikelihood(&context, continuation).await?;
                if best.is_none_or(|(_, logprob)| scored.logprob > logprob) {
                    best = Some((choice, scored.logprob));
                }
            }

            let correct = best.map(|(choice, _)| choice) == Some(doc.answer);
            outcomes.push(if correct { 1.0 } else { 0.0 });
        }
        Ok(outcomes)
    }
}

#[async_trait]
impl EvaluationBackend for HarnessBackend {
    fn framework(&self) -> EvaluationFramework {
        EvaluationFramework::LmHarness
    }

    async fn evaluate_dataset(
        &self,
        model: &dyn LanguageModel,
        dataset: &Dataset,
        config: &EvaluationConfig,
    ) -> LemaResult<MetricMap> {
        let limit = config.num_samples().unwrap_or(usize::MAX);

        let mut tasks = Vec::with_capacity(dataset.subsets.len());
        for subset in &dataset.subsets {
            let outcomes = self.score_subset(model, dataset, subset, limit).await?;
            if outcomes.is_empty() {
                tracing::warn!(
                    dataset = %dataset.name,
                    subset = %subset.name,
                    "Skipping empty subset"
                );
                continue;
            }
            let score = TaskScore::from_outcomes(&outcomes);
            tracing::debug!(
                dataset = %dataset.name,
                subset = %subset.name,
                size = score.size,
                acc = score.acc,
                "Scored task"
            );
            tasks.push(score);
        }

        if tasks.is_empty() {
            return Err(LemaError::dataset(&dataset.name, "no examples to evaluate"));
        }

        let group = aggregate(&tasks);

        let mut metrics = MetricMap::new();
        metrics.insert(metric_key("acc"), group.acc.into());
        metrics.insert(
            metric_key("acc_stderr"),
            group
                .acc_stderr
                .map(MetricValue::from)
                .unwrap_or_else(|| NOT_AVAILABLE.into()),
        );
        metrics.insert("alias".to_string(), dataset.name.as_str().into());
        Ok(metrics)
    }
}

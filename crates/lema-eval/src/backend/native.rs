//! Native framework: next-token accuracy over a target text column

use async_trait::async_trait;
use lema_core::{EvaluationConfig, EvaluationFramework, LemaError, LemaResult};

use super::EvaluationBackend;
use crate::hub::Dataset;
use crate::metrics::MetricMap;
use crate::model::{LanguageModel, TokenPredictions};

/// Name of the native accuracy metric
pub const ACCURACY: &str = "accuracy";

/// Backend for [`EvaluationFramework::Lema`]
///
/// Reads the configured target column from the first `num_samples` rows and
/// reports the fraction of tokens the model predicts greedily from their
/// prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

#[async_trait]
impl EvaluationBackend for NativeBackend {
    fn framework(&self) -> EvaluationFramework {
        EvaluationFramework::Lema
    }

    async fn evaluate_dataset(
        &self,
        model: &dyn LanguageModel,
        dataset: &Dataset,
        config: &EvaluationConfig,
    ) -> LemaResult<MetricMap> {
        let target_col = config.data().target_col();
        let limit = config.num_samples().unwrap_or(usize::MAX);

        let mut predictions = TokenPredictions::default();
        let mut examples = 0;
        for (index, row) in dataset.rows().take(limit).enumerate() {
            let text = row
                .get(target_col)
                .and_then(|value| value.as_str())
                .ok_or_else(|| {
                    LemaError::dataset(
                        &dataset.name,
                        format!("row {} has no text column '{}'", index, target_col),
                    )
                })?;
            predictions.merge(model.next_token_predictions(text).await?);
            examples += 1;
        }

        if examples == 0 {
            return Err(LemaError::dataset(&dataset.name, "no examples to evaluate"));
        }

        tracing::debug!(
            dataset = %dataset.name,
            examples,
            correct = predictions.correct,
            total = predictions.total,
            "Computed next-token accuracy"
        );

        let mut metrics = MetricMap::new();
        metrics.insert(ACCURACY.to_string(), predictions.accuracy().into());
        Ok(metrics)
    }
}

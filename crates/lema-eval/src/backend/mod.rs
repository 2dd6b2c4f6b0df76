//! Evaluation backends, one per evaluation framework

mod harness;
mod multiple_choice;
mod native;

pub use harness::{HarnessBackend, FILTER_NONE};
pub use multiple_choice::MultipleChoiceDoc;
pub use native::NativeBackend;

use async_trait::async_trait;
use lema_core::{EvaluationConfig, EvaluationFramework, LemaResult};

use crate::hub::Dataset;
use crate::metrics::MetricMap;
use crate::model::LanguageModel;

/// Computes a metric mapping for one dataset
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    /// Framework this backend implements
    fn framework(&self) -> EvaluationFramework;

    /// Evaluate `model` on `dataset`, bounded by `config.num_samples()`
    async fn evaluate_dataset(
        &self,
        model: &dyn LanguageModel,
        dataset: &Dataset,
        config: &EvaluationConfig,
    ) -> LemaResult<MetricMap>;
}

/// Backend implementing `framework`
pub fn backend_for(framework: EvaluationFramework) -> Box<dyn EvaluationBackend> {
    match framework {
        EvaluationFramework::Lema => Box::new(NativeBackend),
        EvaluationFramework::LmHarness => Box::new(HarnessBackend),
    }
}

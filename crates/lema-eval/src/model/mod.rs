//! Language model interface used by the evaluation backends
//!
//! Inference itself is delegated: a [`LanguageModel`] only has to answer the
//! two scoring questions the backends ask.

mod completions;

pub use completions::OpenAiCompletionsModel;

use async_trait::async_trait;
use lema_core::LemaResult;

/// Log-likelihood of a continuation given a context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loglikelihood {
    /// Sum of continuation token log-probabilities
    pub logprob: f64,
    /// Whether every continuation token was the model's top choice
    pub is_greedy: bool,
}

/// Greedy next-token predictions compared against the actual tokens of a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenPredictions {
    pub correct: usize,
    pub total: usize,
}

impl TokenPredictions {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    /// Accumulate predictions from another text
    pub fn merge(&mut self, other: TokenPredictions) {
        self.correct += other.correct;
        self.total += other.total;
    }

    /// Fraction of correct predictions, 0.0 when nothing was predicted
    pub fn accuracy(&self) -> f64 {
        if self.total > 0 {
            self.correct as f64 / self.total as f64
        } else {
            0.0
        }
    }
}

/// A resolved model that can score text
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Hub identifier the model was resolved from
    fn name(&self) -> &str;

    /// Score `continuation` as the next text after `context`
    async fn loglikelihood(&self, context: &str, continuation: &str) -> LemaResult<Loglikelihood>;

    /// Predict every token of `text` from its prefix and count the hits
    async fn next_token_predictions(&self, text: &str) -> LemaResult<TokenPredictions>;
}

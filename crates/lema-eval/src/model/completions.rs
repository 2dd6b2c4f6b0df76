//! OpenAI-compatible completions client
//!
//! Scores text by asking the server to echo the prompt with per-token
//! log-probabilities (`echo: true`, `max_tokens: 0`, `logprobs: 1`), which is
//! how lm-evaluation-harness drives `local-completions` servers.

use std::collections::HashMap;

use async_trait::async_trait;
use lema_core::{LemaError, LemaResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{LanguageModel, Loglikelihood, TokenPredictions};

/// Model served behind an OpenAI-compatible `/completions` endpoint
pub struct OpenAiCompletionsModel {
    name: String,
    endpoint: String,
    served_model_name: String,
    api_key: Option<String>,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    logprobs: Option<CompletionLogprobs>,
}

#[derive(Debug, Deserialize)]
struct CompletionLogprobs {
    tokens: Vec<String>,
    token_logprobs: Vec<Option<f64>>,
    #[serde(default)]
    top_logprobs: Vec<Option<HashMap<String, f64>>>,
    text_offset: Vec<usize>,
}

impl CompletionLogprobs {
    fn top_token(&self, index: usize) -> Option<&str> {
        self.top_logprobs
            .get(index)?
            .as_ref()?
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(token, _)| token.as_str())
    }

    /// Sum log-probabilities of the tokens that follow `context` in the echo
    ///
    /// `text_offset` counts characters, not bytes.
    fn continuation_loglikelihood(&self, context: &str) -> LemaResult<Loglikelihood> {
        let context_len = context.chars().count();
        let start = self
            .text_offset
            .iter()
            .position(|&offset| offset >= context_len)
            .ok_or_else(|| LemaError::model("Echoed prompt has no continuation tokens"))?;

        let mut logprob = 0.0;
        let mut is_greedy = true;
        for index in start..self.tokens.len() {
            logprob += self
                .token_logprobs
                .get(index)
                .copied()
                .flatten()
                .ok_or_else(|| {
                    LemaError::model(format!("Missing log-probability for token {}", index))
                })?;
            if self.top_token(index) != Some(self.tokens[index].as_str()) {
                is_greedy = false;
            }
        }

        Ok(Loglikelihood { logprob, is_greedy })
    }

    /// Compare each token against the top prediction for its position
    fn greedy_predictions(&self) -> TokenPredictions {
        let mut predictions = TokenPredictions::default();
        // Position 0 has no prefix to predict from.
        for (index, token) in self.tokens.iter().enumerate().skip(1) {
            if let Some(top) = self.top_token(index) {
                predictions.total += 1;
                if top == token {
                    predictions.correct += 1;
                }
            }
        }
        predictions
    }
}

impl OpenAiCompletionsModel {
    /// Create a client for `served_model_name` at `endpoint` (e.g. `http://localhost:8000/v1`)
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        served_model_name: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            served_model_name: served_model_name.into(),
            api_key: None,
            http_client,
        }
    }

    /// Send a bearer token with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, prompt), fields(model = %self.served_model_name), level = "debug")]
    async fn echo_logprobs(&self, prompt: &str) -> LemaResult<CompletionLogprobs> {
        let url = format!("{}/completions", self.endpoint);
        let request_body = json!({
            "model": self.served_model_name,
            "prompt": prompt,
            "max_tokens": 0,
            "temperature": 0.0,
            "echo": true,
            "logprobs": 1,
        });

        let mut request = self.http_client.post(&url).json(&request_body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| {
            LemaError::model(format!("Completions request to {} failed: {}", url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LemaError::model_with_status(
                format!("Completions API error (status {}): {}", status, error_text),
                &self.name,
                status.as_u16(),
            ));
        }

        let response: CompletionResponse = response.json().await.map_err(|e| {
            LemaError::model(format!("Failed to parse completions response: {}", e))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.logprobs)
            .ok_or_else(|| LemaError::model("Completions response carried no logprobs"))
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompletionsModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn loglikelihood(&self, context: &str, continuation: &str) -> LemaResult<Loglikelihood> {
        let prompt = format!("{}{}", context, continuation);
        let logprobs = self.echo_logprobs(&prompt).await?;
        logprobs.continuation_loglikelihood(context)
    }

    async fn next_token_predictions(&self, text: &str) -> LemaResult<TokenPredictions> {
        let logprobs = self.echo_logprobs(text).await?;
        Ok(logprobs.greedy_predictions())
    }
}

//! End-to-end evaluation tests
//!
//! Datasets are read from a hub directory written to a temp dir; the model is
//! a deterministic in-process stand-in that always prefers the first choice
//! and never predicts the next token.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lema::eval::hub::{DatasetResolver, HubDatasetResolver, ModelResolver};
use lema::eval::model::{LanguageModel, Loglikelihood, TokenPredictions};
use lema::types::{
    DatasetParams, DatasetSplitParams, EvaluationConfig, EvaluationFramework, ModelParams,
};
use lema::{Evaluator, LemaResult, SAVE_FILENAME_JSON};
use serde_json::{json, Value};
use tempfile::TempDir;

struct FirstChoiceModel;

#[async_trait]
impl LanguageModel for FirstChoiceModel {
    fn name(&self) -> &str {
        "openai-community/gpt2"
    }

    async fn loglikelihood(&self, _context: &str, continuation: &str) -> LemaResult<Loglikelihood> {
        let first = continuation == " A";
        Ok(Loglikelihood {
            logprob: if first { -0.5 } else { -3.0 },
            is_greedy: first,
        })
    }

    async fn next_token_predictions(&self, text: &str) -> LemaResult<TokenPredictions> {
        let tokens = text.split_whitespace().count();
        Ok(TokenPredictions::new(0, tokens.saturating_sub(1)))
    }
}

struct StaticModelResolver;

#[async_trait]
impl ModelResolver for StaticModelResolver {
    async fn resolve(&self, _params: &ModelParams) -> LemaResult<Arc<dyn LanguageModel>> {
        Ok(Arc::new(FirstChoiceModel))
    }
}

fn write_split(dir: &Path, rows: &[Value]) {
    std::fs::create_dir_all(dir).unwrap();
    let lines: Vec<String> = rows.iter().map(Value::to_string).collect();
    std::fs::write(dir.join("test.jsonl"), lines.join("\n")).unwrap();
}

/// 57 subjects with four scored questions each and two beyond the sample limit
fn write_mmlu(datasets_dir: &Path) {
    for subject in 0..57 {
        let correct = match subject {
            0..20 => 0,
            20..29 => 1,
            _ => 2,
        };
        let rows: Vec<Value> = (0..6)
            .map(|i| {
                json!({
                    "question": format!("Question {} of subject {}?", i, subject),
                    "choices": ["first", "second", "third", "fourth"],
                    "answer": if i < correct || i >= 4 { 0 } else { 2 },
                })
            })
            .collect();
        write_split(
            &datasets_dir.join("mmlu").join(format!("subject_{:02}", subject)),
            &rows,
        );
    }
}

fn evaluator(datasets_dir: &Path) -> Evaluator {
    let datasets: Arc<dyn DatasetResolver> = Arc::new(HubDatasetResolver::new(datasets_dir));
    Evaluator::new(Arc::new(StaticModelResolver), datasets)
}

fn read_report(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_evaluate_lema() {
    let temp = TempDir::new().unwrap();
    let datasets_dir = temp.path().join("hub").join("datasets");
    write_split(
        &datasets_dir.join("cais").join("mmlu"),
        &[
            json!({"text": "The capital of France is Paris"}),
            json!({"text": "Water boils at one hundred degrees"}),
        ],
    );

    let nested_output_dir = temp.path().join("nested").join("dir");
    let config = EvaluationConfig::builder()
        .output_dir(&nested_output_dir)
        .data(
            DatasetSplitParams::new(vec![DatasetParams::new("cais/mmlu")]).with_target_col("text"),
        )
        .model(ModelParams::new("openai-community/gpt2").with_trust_remote_code(true))
        .evaluation_framework(EvaluationFramework::Lema)
        .num_samples(4)
        .build()
        .unwrap();

    evaluator(&datasets_dir).evaluate_lema(&config).await.unwrap();

    let computed = read_report(&nested_output_dir.join(SAVE_FILENAME_JSON));
    assert_eq!(computed, json!({"cais/mmlu": {"accuracy": 0.0}}));
}

#[tokio::test]
async fn test_evaluate_lm_harness() {
    let temp = TempDir::new().unwrap();
    let datasets_dir = temp.path().join("hub").join("datasets");
    write_mmlu(&datasets_dir);

    let nested_output_dir = temp.path().join("nested").join("dir");
    let config = EvaluationConfig::builder()
        .output_dir(&nested_output_dir)
        .data(DatasetSplitParams::new(vec![DatasetParams::new("mmlu")]))
        .model(ModelParams::new("openai-community/gpt2").with_trust_remote_code(true))
        .evaluation_framework(EvaluationFramework::LmHarness)
        .num_samples(4)
        .build()
        .unwrap();

    evaluator(&datasets_dir)
        .evaluate_lm_harness(&config)
        .await
        .unwrap();

    let computed = read_report(&nested_output_dir.join(SAVE_FILENAME_JSON));
    let mmlu = &computed["mmlu"];
    let acc = mmlu["acc,none"].as_f64().unwrap();
    let stderr = mmlu["acc_stderr,none"].as_f64().unwrap();
    assert_eq!((acc * 1000.0).round() / 1000.0, 0.285);
    assert_eq!((stderr * 1000.0).round() / 1000.0, 0.030);
    assert_eq!(mmlu["alias"], "mmlu");
}

#[tokio::test]
async fn test_missing_dataset_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output_dir = temp.path().join("out");
    let config = EvaluationConfig::builder()
        .output_dir(&output_dir)
        .data(DatasetSplitParams::new(vec![DatasetParams::new("cais/mmlu")]))
        .model(ModelParams::new("openai-community/gpt2"))
        .evaluation_framework(EvaluationFramework::Lema)
        .build()
        .unwrap();

    let err = evaluator(&temp.path().join("datasets"))
        .evaluate(&config)
        .await
        .err()
        .unwrap();

    assert!(err.is_resolution());
    assert!(!output_dir.exists());
}

#[test]
fn test_unknown_framework_rejected_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eval.json");
    std::fs::write(
        &path,
        json!({
            "output_dir": "out",
            "data": {"datasets": [{"dataset_name": "cais/mmlu"}]},
            "model": {"model_name": "openai-community/gpt2"},
            "evaluation_framework": "FOO"
        })
        .to_string(),
    )
    .unwrap();

    let err = lema::load_evaluation_config(&path).unwrap_err();
    assert!(err.is_config());
}

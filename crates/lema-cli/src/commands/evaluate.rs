//! `lema evaluate`

use std::path::PathBuf;

use anyhow::{Context, Result};
use lema_core::{load_evaluation_config, EvaluationConfig, EvaluationFramework, HubSettings};
use lema_eval::{generate_report, output_path, EvalProgress, Evaluator, ReportFormat};

use crate::console;

/// Arguments for an evaluation run
#[derive(Debug, Clone)]
pub struct EvaluateArgs {
    pub config: PathBuf,
    pub framework: Option<EvaluationFramework>,
    pub output_dir: Option<PathBuf>,
    pub num_samples: Option<usize>,
    pub format: ReportFormat,
}

/// Apply command-line overrides; the result is validated again
fn apply_overrides(config: EvaluationConfig, args: &EvaluateArgs) -> Result<EvaluationConfig> {
    if args.framework.is_none() && args.output_dir.is_none() && args.num_samples.is_none() {
        return Ok(config);
    }

    let mut builder = config.to_builder();
    if let Some(framework) = args.framework {
        builder = builder.evaluation_framework(framework);
    }
    if let Some(ref output_dir) = args.output_dir {
        builder = builder.output_dir(output_dir.clone());
    }
    if let Some(num_samples) = args.num_samples {
        builder = builder.num_samples(num_samples);
    }
    Ok(builder.build()?)
}

/// Run an evaluation and print its report
pub async fn run(args: EvaluateArgs) -> Result<()> {
    let config = load_evaluation_config(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let config = apply_overrides(config, &args)?;

    let settings = HubSettings::from_env()?;
    tracing::debug!(
        datasets_dir = %settings.datasets_dir.display(),
        models_dir = %settings.models_dir.display(),
        "Using model and dataset hub"
    );

    let mut evaluator = Evaluator::from_settings(&settings)?;
    evaluator.set_progress_callback(Box::new(|progress: EvalProgress| {
        println!(
            "[{}/{}] {} - {}",
            progress.current + 1,
            progress.total,
            progress.dataset,
            progress.message
        );
    }));

    println!(
        "Evaluating {} with {}...\n",
        config.model().model_name,
        config.evaluation_framework()
    );

    let report = evaluator.evaluate(&config).await?;

    console::print_header("Evaluation Results");
    println!("{}", generate_report(&report, args.format)?);
    console::success(&format!(
        "Saved report to {}",
        output_path(&config).display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lema_core::{DatasetParams, DatasetSplitParams, ModelParams};

    fn config() -> EvaluationConfig {
        EvaluationConfig::builder()
            .output_dir("out")
            .data(DatasetSplitParams::new(vec![DatasetParams::new("cais/mmlu")]))
            .model(ModelParams::new("gpt2"))
            .evaluation_framework(EvaluationFramework::Lema)
            .build()
            .unwrap()
    }

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            config: PathBuf::from("eval.yaml"),
            framework: None,
            output_dir: None,
            num_samples: None,
            format: ReportFormat::Table,
        }
    }

    #[test]
    fn test_no_overrides() {
        assert_eq!(apply_overrides(config(), &args()).unwrap(), config());
    }

    #[test]
    fn test_overrides_applied() {
        let args = EvaluateArgs {
            framework: Some(EvaluationFramework::LmHarness),
            output_dir: Some(PathBuf::from("elsewhere")),
            num_samples: Some(4),
            ..args()
        };
        let config = apply_overrides(config(), &args).unwrap();

        assert_eq!(config.evaluation_framework(), EvaluationFramework::LmHarness);
        assert_eq!(config.output_dir(), PathBuf::from("elsewhere").as_path());
        assert_eq!(config.num_samples(), Some(4));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = EvaluateArgs {
            num_samples: Some(0),
            ..args()
        };
        assert!(apply_overrides(config(), &args).is_err());
    }
}

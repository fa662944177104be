//! cheat-trainer entrypoint: one batch run per process.
//! Config comes from `CHEAT_TRAINER_CONFIG_PATH` (default `config.json`); missing file means defaults.

use cheat_trainer::{
    config::TrainerConfig,
    features::{FeatureVector, Label},
    logging::{RunSummary, StructuredLogger},
    pipeline,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("CHEAT_TRAINER_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = TrainerConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);

    let outcome = pipeline::run(&config)?;

    println!("Accuracy: {}", outcome.report.accuracy);
    println!("Classification Report:");
    println!("{}", outcome.report);
    for (name, imp) in FeatureVector::FEATURE_NAMES
        .iter()
        .zip(&outcome.feature_importances)
    {
        println!("feature importance {:<16}{:.4}", name, imp);
    }
    println!("Model saved as {}", outcome.model_path.display());

    if config.log.json {
        let data_path = config.data_path.display().to_string();
        let model_path = outcome.model_path.display().to_string();
        let summary = RunSummary {
            message: "training complete",
            data_path: &data_path,
            model_path: &model_path,
            rows: outcome.rows,
            train_rows: outcome.train_rows,
            test_rows: outcome.test_rows,
            accuracy: outcome.report.accuracy,
            f1_not_cheating: outcome.report.class(Label::NotCheating).f1,
            f1_cheating: outcome.report.class(Label::Cheating).f1,
            feature_importances: Some(&outcome.feature_importances),
        };
        StructuredLogger::emit_json(&summary, &mut std::io::stderr());
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "training run failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! End-to-end run: Loader → Feature Extractor → Trainer/Evaluator → Artifact Store.

use crate::config::TrainerConfig;
use crate::error::Result;
use crate::evaluation::ClassificationReport;
use crate::features::FeatureExtractor;
use crate::loader::load_records;
use crate::storage::ArtifactStore;
use crate::training::Trainer;
use std::path::PathBuf;
use tracing::info;

/// What a completed run reports. The model itself has already been persisted.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub test_indices: Vec<usize>,
    pub report: ClassificationReport,
    pub feature_importances: Vec<f64>,
    pub model_path: PathBuf,
}

/// Run the whole batch once. Any error aborts before the artifact is written,
/// except a failure of the write itself.
pub fn run(config: &TrainerConfig) -> Result<PipelineOutcome> {
    config.validate()?;
    info!(
        data_path = %config.data_path.display(),
        model_path = %config.model_path.display(),
        seed = config.seed,
        "training run starting"
    );

    let records = load_records(&config.data_path)?;
    let dataset = FeatureExtractor::new().extract_all(&records)?;
    let outcome = Trainer::new(config).train(&dataset)?;

    let feature_importances = outcome.model.feature_importances().to_vec();
    ArtifactStore::save(outcome.model, &config.model_path)?;

    Ok(PipelineOutcome {
        rows: dataset.len(),
        train_rows: outcome.train_rows,
        test_rows: outcome.test_indices.len(),
        test_indices: outcome.test_indices,
        report: outcome.report,
        feature_importances,
        model_path: config.model_path.clone(),
    })
}

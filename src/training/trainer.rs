use crate::config::{ForestConfig, SplitConfig, TrainerConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::evaluation::ClassificationReport;
use crate::features::Label;
use crate::model::{Classifier, RandomForest, TrainedModel};
use tracing::{info, warn};

/// Result of one training run. The model is moved out to the artifact store.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub report: ClassificationReport,
    pub train_rows: usize,
    /// Source-row indices of the held-out partition, in split order
    pub test_indices: Vec<usize>,
}

pub struct Trainer {
    split: SplitConfig,
    forest: ForestConfig,
    seed: u64,
}

impl Trainer {
    pub fn new(config: &TrainerConfig) -> Self {
        Self {
            split: config.split.clone(),
            forest: config.forest.clone(),
            seed: config.seed,
        }
    }

    /// Split, fit on the training part, evaluate on the held-out part.
    /// Fails before fitting if the data cannot be split into two non-empty,
    /// two-class-capable partitions.
    pub fn train(&self, dataset: &Dataset) -> Result<TrainingOutcome> {
        let split = dataset.train_test_split(self.split.test_ratio, self.seed)?;

        let test_classes = Label::ALL
            .iter()
            .filter(|l| split.test_y.contains(l))
            .count();
        if test_classes < 2 {
            warn!(
                test_rows = split.test_y.len(),
                "held-out partition contains a single class; its metrics for the other class will be 0"
            );
        }

        let mut model = RandomForest::new(self.forest.clone(), self.seed);
        model.fit(split.train_x.view(), &split.train_y)?;

        let predictions = model.predict(split.test_x.view())?;
        let report = ClassificationReport::compute(&split.test_y, &predictions)?;

        info!(
            accuracy = report.accuracy,
            f1_not_cheating = report.class(Label::NotCheating).f1,
            f1_cheating = report.class(Label::Cheating).f1,
            test_rows = split.test_y.len(),
            "evaluated held-out partition"
        );

        Ok(TrainingOutcome {
            model,
            report,
            train_rows: split.train_indices.len(),
            test_indices: split.test_indices,
        })
    }
}

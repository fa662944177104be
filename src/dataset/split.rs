//! Seeded, non-stratified train/test split.

use super::Dataset;
use crate::error::{PipelineError, Result};
use crate::features::Label;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Train/held-out partition. Index lists refer to rows of the source [`Dataset`].
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub train_x: Array2<f64>,
    pub train_y: Vec<Label>,
    pub test_x: Array2<f64>,
    pub test_y: Vec<Label>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl Dataset {
    /// Shuffle row indices with `seed`, hold out `ceil(n * test_ratio)` rows.
    ///
    /// Fails with `InsufficientData` for an empty or single-class dataset, or
    /// when either side of the split would be empty.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> Result<DataSplit> {
        let n = self.len();
        if n == 0 {
            return Err(PipelineError::InsufficientData("dataset is empty".into()));
        }
        if self.distinct_labels() < 2 {
            return Err(PipelineError::InsufficientData(format!(
                "need both labels 0 and 1, found only {}",
                self.rows()[0].label.index()
            )));
        }

        let n_test = ((n as f64) * test_ratio).ceil() as usize;
        let n_train = n.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(PipelineError::InsufficientData(format!(
                "{} rows with test_ratio {} gives train={} test={}",
                n, test_ratio, n_train, n_test
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        let (test_indices, train_indices) = indices.split_at(n_test);
        let test_indices = test_indices.to_vec();
        let train_indices = train_indices.to_vec();

        info!(train_rows = n_train, test_rows = n_test, seed, "split dataset");

        Ok(DataSplit {
            train_x: self.feature_matrix(&train_indices),
            train_y: self.labels(&train_indices),
            test_x: self.feature_matrix(&test_indices),
            test_y: self.labels(&test_indices),
            train_indices,
            test_indices,
        })
    }
}

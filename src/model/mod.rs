//! Classifier capability and the random-forest implementation behind it.

mod forest;
mod tree;

pub use forest::RandomForest;
pub use tree::{DecisionTree, Node, TreeParams};

use crate::error::Result;
use crate::features::Label;
use ndarray::{Array2, ArrayView2};

/// Binary classifier over rows of a `[n_samples, n_features]` matrix.
pub trait Classifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[Label]) -> Result<()>;

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<Label>>;

    /// `[n_samples, 2]`; column j is the probability of class j.
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

/// The fitted model handed from the trainer to the artifact store.
pub type TrainedModel = RandomForest;

//! Bagged ensemble of CART trees with per-tree seeds derived from one master seed.

use super::tree::{DecisionTree, TreeParams};
use super::Classifier;
use crate::config::ForestConfig;
use crate::error::{PipelineError, Result};
use crate::features::Label;
use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    seed: u64,
    n_features: usize,
    trees: Vec<DecisionTree>,
    /// Mean normalized impurity decrease per feature; empty until fitted
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(config: ForestConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            n_features: 0,
            trees: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    fn check_input(&self, x: &ArrayView2<'_, f64>) -> Result<()> {
        if !self.is_fitted() {
            return Err(PipelineError::Model("predict called before fit".into()));
        }
        if x.ncols() != self.n_features {
            return Err(PipelineError::Model(format!(
                "expected {} features, got {}",
                self.n_features,
                x.ncols()
            )));
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[Label]) -> Result<()> {
        let n = x.nrows();
        if n == 0 || x.ncols() == 0 {
            return Err(PipelineError::InsufficientData(
                "cannot fit on an empty feature matrix".into(),
            ));
        }
        if n != y.len() {
            return Err(PipelineError::Model(format!(
                "{} feature rows but {} labels",
                n,
                y.len()
            )));
        }

        let n_features = x.ncols();
        let params = TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: ((n_features as f64).sqrt().floor() as usize).max(1),
        };

        let mut master = ChaCha8Rng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.config.n_estimators);
        let mut importances = vec![0.0; n_features];

        for t in 0..self.config.n_estimators {
            let mut rng = ChaCha8Rng::seed_from_u64(master.gen::<u64>());
            let samples: Vec<usize> = if self.config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let mut tree_imp = vec![0.0; n_features];
            let tree = DecisionTree::fit(x, y, samples, &params, &mut rng, &mut tree_imp);
            let total: f64 = tree_imp.iter().sum();
            if total > 0.0 {
                for (acc, v) in importances.iter_mut().zip(&tree_imp) {
                    *acc += v / total;
                }
            }
            debug!(tree = t, depth = tree.depth(), leaves = tree.n_leaves(), "fitted tree");
            trees.push(tree);
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for v in importances.iter_mut() {
                *v /= total;
            }
        }

        self.n_features = n_features;
        self.trees = trees;
        self.feature_importances = importances;
        info!(
            trees = self.trees.len(),
            train_rows = n,
            max_features = params.max_features,
            "fitted random forest"
        );
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<Label>> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .rows()
            .into_iter()
            .map(|p| {
                if p[1] > p[0] {
                    Label::Cheating
                } else {
                    Label::NotCheating
                }
            })
            .collect())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.check_input(&x)?;
        let mut out = Array2::<f64>::zeros((x.nrows(), 2));
        let n_trees = self.trees.len() as f64;
        for (i, row) in x.rows().into_iter().enumerate() {
            let mut acc = [0.0f64; 2];
            for tree in &self.trees {
                let p = tree.predict_proba_row(row);
                acc[0] += p[0];
                acc[1] += p[1];
            }
            out[[i, 0]] = acc[0] / n_trees;
            out[[i, 1]] = acc[1] / n_trees;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Cheating iff many tab switches AND few changes: not linearly separable in raw units.
    fn toy(n: usize) -> (Array2<f64>, Vec<Label>) {
        let mut x = Array2::<f64>::zeros((n, 3));
        let mut y = Vec::with_capacity(n);
        for i in 0..n {
            let tabs = (i % 7) as f64;
            let changes = ((i * 3) % 5) as f64;
            x[[i, 0]] = 30.0 + (i % 11) as f64;
            x[[i, 1]] = changes;
            x[[i, 2]] = tabs;
            y.push(if tabs >= 4.0 && changes <= 1.0 {
                Label::Cheating
            } else {
                Label::NotCheating
            });
        }
        (x, y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_estimators: 15,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn predict_before_fit_is_an_error() {
        let f = RandomForest::new(small_config(), 42);
        let x = Array2::<f64>::zeros((1, 3));
        assert!(matches!(f.predict(x.view()), Err(PipelineError::Model(_))));
    }

    #[test]
    fn fit_predict_shapes_and_probabilities() {
        let (x, y) = toy(140);
        let mut f = RandomForest::new(small_config(), 42);
        f.fit(x.view(), &y).unwrap();
        assert_eq!(f.trees().len(), 15);

        let proba = f.predict_proba(x.view()).unwrap();
        assert_eq!(proba.shape(), &[140, 2]);
        for row in proba.rows() {
            assert!((row[0] + row[1] - 1.0).abs() < 1e-9);
        }

        let preds = f.predict(x.view()).unwrap();
        let correct = preds.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = toy(60);
        let mut a = RandomForest::new(small_config(), 7);
        let mut b = RandomForest::new(small_config(), 7);
        a.fit(x.view(), &y).unwrap();
        b.fit(x.view(), &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn importances_sum_to_one_and_ignore_noise() {
        let (x, y) = toy(140);
        let mut f = RandomForest::new(small_config(), 42);
        f.fit(x.view(), &y).unwrap();
        let imp = f.feature_importances();
        assert_eq!(imp.len(), 3);
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(imp[1] + imp[2] > imp[0]);
    }

    #[test]
    fn width_mismatch_is_an_error() {
        let (x, y) = toy(30);
        let mut f = RandomForest::new(small_config(), 42);
        f.fit(x.view(), &y).unwrap();
        let wrong = Array2::<f64>::zeros((2, 2));
        assert!(f.predict_proba(wrong.view()).is_err());
    }

    #[test]
    fn label_count_mismatch_is_an_error() {
        let (x, y) = toy(30);
        let mut f = RandomForest::new(small_config(), 42);
        assert!(f.fit(x.view(), &y[..10]).is_err());
    }

    #[test]
    fn extreme_column_values_still_fit() {
        let (mut x, y) = toy(60);
        for i in (0..60).step_by(4) {
            x[[i, 0]] = f64::MAX;
        }
        x[[1, 0]] = 1e308;
        let mut f = RandomForest::new(small_config(), 42);
        f.fit(x.view(), &y).unwrap();
        assert_eq!(f.trees().len(), 15);
        for tree in f.trees() {
            for node in tree.nodes() {
                if let crate::model::Node::Split { threshold, .. } = node {
                    assert!(threshold.is_finite());
                }
            }
        }
        let proba = f.predict_proba(x.view()).unwrap();
        assert!(proba.iter().all(|p| p.is_finite()));
    }
}

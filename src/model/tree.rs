//! CART decision tree (Gini impurity) stored as a flat node arena.

use crate::features::Label;
use ndarray::{ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        /// Class fractions of the training samples that reached this leaf
        proba: [f64; 2],
        samples: usize,
    },
    /// Rows with `x[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Candidate features examined per split
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(counts: [usize; 2]) -> f64 {
    let n = (counts[0] + counts[1]) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / n;
    let p1 = counts[1] as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}

fn class_counts(y: &[Label], samples: &[usize]) -> [usize; 2] {
    let mut c = [0usize; 2];
    for &i in samples {
        c[y[i].index()] += 1;
    }
    c
}

impl DecisionTree {
    /// Grow a tree on `samples` (row indices into `x`, duplicates allowed).
    ///
    /// Adds this tree's weighted impurity decrease per feature into `importances`.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[Label],
        samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut ChaCha8Rng,
        importances: &mut [f64],
    ) -> Self {
        let n_features = x.ncols();
        let mut nodes = vec![Node::Leaf {
            proba: [0.0; 2],
            samples: 0,
        }];
        let mut stack: Vec<(usize, Vec<usize>, usize)> = vec![(0, samples, 0)];
        let mut features: Vec<usize> = (0..n_features).collect();

        while let Some((node_id, idx, depth)) = stack.pop() {
            let counts = class_counts(y, &idx);
            let n = idx.len();
            let pure = counts[0] == 0 || counts[1] == 0;
            let depth_reached = params.max_depth.map(|d| depth >= d).unwrap_or(false);

            let split = if pure || depth_reached || n < params.min_samples_split {
                None
            } else {
                features.shuffle(rng);
                Self::best_split(x, y, &idx, &features, params)
            };

            let Some(best) = split else {
                nodes[node_id] = leaf(counts);
                continue;
            };

            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = idx
                .iter()
                .partition(|&&i| x[[i, best.feature]] <= best.threshold);
            if left_idx.is_empty() || right_idx.is_empty() {
                nodes[node_id] = leaf(counts);
                continue;
            }

            let parent = n as f64 * gini(counts);
            let children = best.impurity * n as f64;
            importances[best.feature] += parent - children;

            let left = nodes.len();
            nodes.push(leaf([0, 0]));
            let right = nodes.len();
            nodes.push(leaf([0, 0]));
            nodes[node_id] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };
            stack.push((right, right_idx, depth + 1));
            stack.push((left, left_idx, depth + 1));
        }

        Self { nodes, n_features }
    }

    /// Scan candidate features in `order`; constant features are skipped and
    /// do not count towards `max_features`. If none of the first
    /// `max_features` usable features yields a split, keep looking.
    fn best_split(
        x: ArrayView2<'_, f64>,
        y: &[Label],
        idx: &[usize],
        order: &[usize],
        params: &TreeParams,
    ) -> Option<BestSplit> {
        let n = idx.len();
        let total = class_counts(y, idx);
        let mut best: Option<BestSplit> = None;
        let mut examined = 0usize;
        let mut column: Vec<(f64, usize)> = Vec::with_capacity(n);

        for &f in order {
            if examined >= params.max_features && best.is_some() {
                break;
            }
            column.clear();
            column.extend(idx.iter().map(|&i| (x[[i, f]], y[i].index())));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));
            if column[0].0 == column[n - 1].0 {
                continue;
            }
            examined += 1;

            let mut left = [0usize; 2];
            for p in 1..n {
                left[column[p - 1].1] += 1;
                let (lo, hi) = (column[p - 1].0, column[p].0);
                if lo == hi {
                    continue;
                }
                if p < params.min_samples_leaf || n - p < params.min_samples_leaf {
                    continue;
                }
                let right = [total[0] - left[0], total[1] - left[1]];
                let impurity =
                    (p as f64 * gini(left) + (n - p) as f64 * gini(right)) / n as f64;
                if best.as_ref().map(|b| impurity < b.impurity).unwrap_or(true) {
                    let mut threshold = lo / 2.0 + hi / 2.0;
                    if !threshold.is_finite() || threshold >= hi {
                        threshold = lo;
                    }
                    // an infinite cut cannot be stored in the artifact
                    if !threshold.is_finite() {
                        continue;
                    }
                    best = Some(BestSplit {
                        feature: f,
                        threshold,
                        impurity,
                    });
                }
            }
        }
        best
    }

    pub fn predict_proba_row(&self, row: ArrayView1<'_, f64>) -> [f64; 2] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { proba, .. } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((id, d)) = stack.pop() {
            max = max.max(d);
            if let Node::Split { left, right, .. } = self.nodes[id] {
                stack.push((left, d + 1));
                stack.push((right, d + 1));
            }
        }
        max
    }
}

fn leaf(counts: [usize; 2]) -> Node {
    let n = counts[0] + counts[1];
    let proba = if n == 0 {
        [0.0; 2]
    } else {
        [counts[0] as f64 / n as f64, counts[1] as f64 / n as f64]
    };
    Node::Leaf { proba, samples: n }
}

//! Labeled feature table and its deterministic train/test partition.

mod split;

pub use split::DataSplit;

use crate::features::{FeatureVector, Label, LabeledFeatures};
use ndarray::Array2;

/// Ordered (features, label) rows; row i came from input record i.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<LabeledFeatures>,
}

impl Dataset {
    pub fn new(rows: Vec<LabeledFeatures>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LabeledFeatures] {
        &self.rows
    }

    /// Row counts for class 0 and class 1.
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for r in &self.rows {
            counts[r.label.index()] += 1;
        }
        counts
    }

    pub fn distinct_labels(&self) -> usize {
        self.class_counts().iter().filter(|&&c| c > 0).count()
    }

    /// `[indices.len(), 3]` feature matrix for the given rows, in the given order.
    pub fn feature_matrix(&self, indices: &[usize]) -> Array2<f64> {
        let mut x = Array2::<f64>::zeros((indices.len(), FeatureVector::DIM));
        for (out_row, &i) in indices.iter().enumerate() {
            for (col, v) in self.rows[i].features.as_array().into_iter().enumerate() {
                x[[out_row, col]] = v;
            }
        }
        x
    }

    pub fn labels(&self, indices: &[usize]) -> Vec<Label> {
        indices.iter().map(|&i| self.rows[i].label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: f64, label: Label) -> LabeledFeatures {
        LabeledFeatures {
            features: FeatureVector {
                avg_time: t,
                total_changes: t * 2.0,
                tab_switch_count: 1.0,
            },
            label,
        }
    }

    #[test]
    fn counts_and_matrix() {
        let ds = Dataset::new(vec![
            row(1.0, Label::NotCheating),
            row(2.0, Label::Cheating),
            row(3.0, Label::Cheating),
        ]);
        assert_eq!(ds.class_counts(), [1, 2]);
        assert_eq!(ds.distinct_labels(), 2);
        let x = ds.feature_matrix(&[2, 0]);
        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(x[[0, 0]], 3.0);
        assert_eq!(x[[0, 1]], 6.0);
        assert_eq!(x[[1, 0]], 1.0);
        assert_eq!(ds.labels(&[2, 0]), vec![Label::Cheating, Label::NotCheating]);
    }
}

//! Confusion-matrix metrics for the two session classes.

use crate::error::{PipelineError, Result};
use crate::features::Label;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// True rows of this class in the evaluated set
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    /// Indexed by [`Label::index`]: class 0 then class 1
    pub classes: [ClassMetrics; 2],
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    /// `confusion[true][predicted]`
    pub confusion: [[usize; 2]; 2],
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    /// Zero denominators give 0.0 rather than NaN.
    pub fn compute(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(PipelineError::Model(format!(
                "{} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }

        let mut confusion = [[0usize; 2]; 2];
        for (t, p) in y_true.iter().zip(y_pred) {
            confusion[t.index()][p.index()] += 1;
        }

        let total = y_true.len();
        let correct = confusion[0][0] + confusion[1][1];
        let accuracy = ratio(correct, total);

        let mut classes = [ClassMetrics::default(); 2];
        for label in Label::ALL {
            let c = label.index();
            let o = 1 - c;
            let tp = confusion[c][c];
            let fp = confusion[o][c];
            let fn_count = confusion[c][o];
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_count);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            classes[c] = ClassMetrics {
                precision,
                recall,
                f1,
                support: tp + fn_count,
            };
        }

        let macro_avg = ClassMetrics {
            precision: (classes[0].precision + classes[1].precision) / 2.0,
            recall: (classes[0].recall + classes[1].recall) / 2.0,
            f1: (classes[0].f1 + classes[1].f1) / 2.0,
            support: total,
        };
        let weighted = |get: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|m| get(m) * m.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|m: &ClassMetrics| m.precision),
            recall: weighted(|m: &ClassMetrics| m.recall),
            f1: weighted(|m: &ClassMetrics| m.f1),
            support: total,
        };

        Ok(Self {
            accuracy,
            classes,
            macro_avg,
            weighted_avg,
            confusion,
        })
    }

    pub fn class(&self, label: Label) -> &ClassMetrics {
        &self.classes[label.index()]
    }

    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

impl std::fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>12}{:>11}{:>10}{:>10}{:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            let m = self.class(label);
            writeln!(
                f,
                "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}",
                label.index(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12}{:>11}{:>10}{:>10.2}{:>10}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Label::{Cheating as C, NotCheating as N};

    #[test]
    fn perfect_predictions() {
        let y = [N, N, C, C];
        let r = ClassificationReport::compute(&y, &y).unwrap();
        assert!((r.accuracy - 1.0).abs() < 1e-12);
        for m in r.classes {
            assert!((m.precision - 1.0).abs() < 1e-12);
            assert!((m.recall - 1.0).abs() < 1e-12);
            assert!((m.f1 - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn mixed_counts() {
        // class 1: tp=3 fp=1 fn=1; class 0: tp=2 fp=1 fn=1
        let y_true = [C, C, C, N, N, N, C];
        let y_pred = [C, C, C, C, N, N, N];
        let r = ClassificationReport::compute(&y_true, &y_pred).unwrap();
        assert_eq!(r.confusion, [[2, 1], [1, 3]]);
        assert!((r.accuracy - 5.0 / 7.0).abs() < 1e-12);
        let c1 = r.class(C);
        assert!((c1.precision - 0.75).abs() < 1e-12);
        assert!((c1.recall - 0.75).abs() < 1e-12);
        assert_eq!(c1.support, 4);
        let c0 = r.class(N);
        assert!((c0.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((c0.recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(c0.support, 3);
        let expected_weighted_f1 = (3.0 * (2.0 / 3.0) + 4.0 * 0.75) / 7.0;
        assert!((r.weighted_avg.f1 - expected_weighted_f1).abs() < 1e-12);
    }

    #[test]
    fn absent_class_gives_zero_not_nan() {
        let y_true = [N, N];
        let y_pred = [N, N];
        let r = ClassificationReport::compute(&y_true, &y_pred).unwrap();
        let c1 = r.class(C);
        assert_eq!(c1.precision, 0.0);
        assert_eq!(c1.recall, 0.0);
        assert_eq!(c1.f1, 0.0);
        assert_eq!(c1.support, 0);
    }

    #[test]
    fn empty_input() {
        let r = ClassificationReport::compute(&[], &[]).unwrap();
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.weighted_avg.f1, 0.0);
    }

    #[test]
    fn length_mismatch() {
        assert!(ClassificationReport::compute(&[N], &[]).is_err());
    }

    #[test]
    fn display_has_one_row_per_class() {
        let r = ClassificationReport::compute(&[N, C, C], &[N, C, N]).unwrap();
        let text = r.to_string();
        assert!(text.contains("precision"));
        let class_rows = text
            .lines()
            .filter(|l| matches!(l.split_whitespace().next(), Some("0") | Some("1")))
            .count();
        assert_eq!(class_rows, 2);
        assert!(text.contains("accuracy"));
    }
}

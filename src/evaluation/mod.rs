//! Held-out evaluation: accuracy and per-class precision/recall/F1.

mod report;

pub use report::{ClassMetrics, ClassificationReport};

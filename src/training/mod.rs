//! Trainer/evaluator: split, fit, score the held-out rows.

mod trainer;

pub use trainer::{Trainer, TrainingOutcome};

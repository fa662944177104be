//! cheat-trainer — trains a cheating classifier from exam session telemetry.
//!
//! Modular structure:
//! - [`loader`] — CSV export → raw session records
//! - [`features`] — Strict sequence decoding and the 3-feature session vector
//! - [`dataset`] — Labeled feature table and seeded train/test split
//! - [`model`] — `Classifier` trait and the random forest behind it
//! - [`evaluation`] — Accuracy and per-class precision/recall/F1
//! - [`training`] — Split, fit, evaluate
//! - [`storage`] — JSON model artifact
//! - [`logging`] — tracing setup and JSON run summaries
//! - [`pipeline`] — One end-to-end batch run

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod loader;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod storage;
pub mod training;

pub use config::TrainerConfig;
pub use dataset::{DataSplit, Dataset};
pub use error::{PipelineError, Result};
pub use evaluation::ClassificationReport;
pub use features::{FeatureExtractor, FeatureVector, Label, LabeledFeatures};
pub use loader::SessionRecord;
pub use logging::StructuredLogger;
pub use model::{Classifier, RandomForest, TrainedModel};
pub use storage::ArtifactStore;
pub use training::Trainer;

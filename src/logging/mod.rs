//! Structured logging setup and one-line JSON run summaries.

mod format;

pub use format::{RunSummary, StructuredLogger};

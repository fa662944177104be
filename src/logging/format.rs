//! Log lines go to stderr (plain or ndjson); stdout is reserved for the report.

use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Machine-readable outcome of a completed run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub message: &'a str,
    pub data_path: &'a str,
    pub model_path: &'a str,
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
    pub f1_not_cheating: f64,
    pub f1_cheating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<&'a [f64]>,
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber, level from RUST_LOG or `default_level`.
    /// Returns false when a subscriber was already installed; the existing one is kept.
    pub fn init(json: bool, default_level: &str) -> bool {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let result = if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "tracing subscriber already installed");
                false
            }
        }
    }

    /// Emit a single JSON line without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}

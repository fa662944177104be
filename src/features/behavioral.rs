//! Aggregate behavioral statistics for a single session.

use super::{parse_sequence, FeatureVector};
use crate::error::{PipelineError, Result};
use crate::loader::SessionRecord;
use serde::{Deserialize, Serialize};

const TIME_COLUMN: &str = "timeSpentPerQuestion";
const CHANGES_COLUMN: &str = "answerChangesPerQuestion";
const TAB_COLUMN: &str = "tabSwitchCount";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Mean seconds per question; 0 when no questions were recorded
    pub avg_time: f64,
    /// Answer changes summed over all questions
    pub total_changes: f64,
    pub tab_switch_count: f64,
}

impl SessionStats {
    /// `row` is the 1-based data row, used only in error messages.
    pub fn from_record(row: usize, record: &SessionRecord) -> Result<Self> {
        let times = decode(row, TIME_COLUMN, record.time_spent_per_question.as_deref())?;
        let changes = decode(row, CHANGES_COLUMN, record.answer_changes_per_question.as_deref())?;

        let avg_time = mean(&times);
        let total_changes = changes.iter().sum::<f64>();
        if !total_changes.is_finite() {
            return Err(PipelineError::MalformedSequenceField {
                row,
                column: CHANGES_COLUMN,
                value: record.answer_changes_per_question.clone().unwrap_or_default(),
                reason: "sum overflows f64".into(),
            });
        }
        let tab_switch_count = parse_count(row, record.tab_switch_count.as_deref())?;

        Ok(Self {
            avg_time,
            total_changes,
            tab_switch_count,
        })
    }

    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector {
            avg_time: self.avg_time,
            total_changes: self.total_changes,
            tab_switch_count: self.tab_switch_count,
        }
    }
}

/// 0 for an empty list. Falls back to a running mean when the plain sum overflows.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / values.len() as f64;
    }
    values
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, &v)| m + (v - m) / (k + 1) as f64)
}

fn decode(row: usize, column: &'static str, cell: Option<&str>) -> Result<Vec<f64>> {
    let Some(text) = cell else {
        return Ok(Vec::new());
    };
    parse_sequence(text).map_err(|e| PipelineError::MalformedSequenceField {
        row,
        column,
        value: text.to_string(),
        reason: e.to_string(),
    })
}

/// Integer cell; exports write nullable ints as `3.0`, so integral floats pass too.
fn parse_count(row: usize, cell: Option<&str>) -> Result<f64> {
    let Some(text) = cell else {
        return Ok(0.0);
    };
    let t = text.trim();
    if let Ok(n) = t.parse::<i64>() {
        return Ok(n as f64);
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v),
        _ => Err(PipelineError::InvalidValue {
            row,
            column: TAB_COLUMN,
            value: text.to_string(),
        }),
    }
}

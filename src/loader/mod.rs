//! Loader: exported session records (CSV) → in-memory rows.
//!
//! Cells are kept as text; decoding happens in [`crate::features`].

mod csv_source;

pub use csv_source::{load_records, read_records};

use serde::{Deserialize, Serialize};

/// One exported exam session. `None` means the cell was null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "timeSpentPerQuestion")]
    pub time_spent_per_question: Option<String>,
    #[serde(rename = "answerChangesPerQuestion")]
    pub answer_changes_per_question: Option<String>,
    #[serde(rename = "tabSwitchCount")]
    pub tab_switch_count: Option<String>,
    pub label: Option<String>,
}

impl SessionRecord {
    pub fn new(
        time_spent_per_question: Option<&str>,
        answer_changes_per_question: Option<&str>,
        tab_switch_count: Option<&str>,
        label: Option<&str>,
    ) -> Self {
        Self {
            time_spent_per_question: time_spent_per_question.map(str::to_string),
            answer_changes_per_question: answer_changes_per_question.map(str::to_string),
            tab_switch_count: tab_switch_count.map(str::to_string),
            label: label.map(str::to_string),
        }
    }

    /// Collapse the export's null spellings to `None`.
    fn normalize_nulls(mut self) -> Self {
        for cell in [
            &mut self.time_spent_per_question,
            &mut self.answer_changes_per_question,
            &mut self.tab_switch_count,
            &mut self.label,
        ] {
            if cell.as_deref().map(is_null).unwrap_or(false) {
                *cell = None;
            }
        }
        self
    }
}

/// Null spellings written by common dataframe exports.
pub fn is_null(cell: &str) -> bool {
    matches!(
        cell.trim(),
        "" | "NaN" | "nan" | "NA" | "null" | "NULL" | "None"
    )
}

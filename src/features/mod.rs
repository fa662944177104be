//! Per-session feature extraction: raw record → fixed 3-dim vector + label.

mod behavioral;
mod pipeline;
mod sequence;

pub use behavioral::SessionStats;
pub use pipeline::FeatureExtractor;
pub use sequence::{parse_sequence, SequenceError};

use serde::{Deserialize, Serialize};

/// Ground-truth class of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    NotCheating,
    Cheating,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::NotCheating, Label::Cheating];

    pub fn index(self) -> usize {
        match self {
            Label::NotCheating => 0,
            Label::Cheating => 1,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Label::NotCheating),
            1 => Some(Label::Cheating),
            _ => None,
        }
    }
}

impl From<Label> for u8 {
    fn from(l: Label) -> u8 {
        l.index() as u8
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Label::from_index(v as usize).ok_or_else(|| format!("label must be 0 or 1, got {}", v))
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Fixed-shape model input. Column order is [`FeatureVector::FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub avg_time: f64,
    pub total_changes: f64,
    pub tab_switch_count: f64,
}

impl FeatureVector {
    pub const DIM: usize = 3;
    pub const FEATURE_NAMES: [&'static str; 3] = ["avgTime", "totalChanges", "tabSwitchCount"];

    pub fn as_array(&self) -> [f64; 3] {
        [self.avg_time, self.total_changes, self.tab_switch_count]
    }
}

/// One extracted row: features with the label carried alongside unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledFeatures {
    pub features: FeatureVector,
    pub label: Label,
}

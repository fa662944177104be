//! Feature extraction pipeline: session records → behavioral stats → labeled vectors.

use super::{Label, LabeledFeatures, SessionStats};
use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::loader::SessionRecord;
use tracing::{debug, info};

/// Stateless, row-independent extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract one record. `row` is 1-based and only used in error messages.
    pub fn extract(&self, row: usize, record: &SessionRecord) -> Result<LabeledFeatures> {
        let stats = SessionStats::from_record(row, record)?;
        let label = parse_label(row, record.label.as_deref())?;
        Ok(LabeledFeatures {
            features: stats.to_vector(),
            label,
        })
    }

    /// Extract every record in order. The first bad row aborts the whole batch.
    pub fn extract_all(&self, records: &[SessionRecord]) -> Result<Dataset> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(i, r)| self.extract(i + 1, r))
            .collect::<Result<Vec<_>>>()?;
        let dataset = Dataset::new(rows);
        let [not_cheating, cheating] = dataset.class_counts();
        info!(rows = dataset.len(), not_cheating, cheating, "extracted features");
        if let Some(first) = dataset.rows().first() {
            debug!(features = ?first.features, "first feature vector");
        }
        Ok(dataset)
    }
}

fn parse_label(row: usize, cell: Option<&str>) -> Result<Label> {
    let invalid = || PipelineError::InvalidLabel {
        row,
        value: cell.unwrap_or_default().to_string(),
    };
    match cell.map(str::trim) {
        Some("0") | Some("0.0") => Ok(Label::NotCheating),
        Some("1") | Some("1.0") => Ok(Label::Cheating),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;

    #[test]
    fn extracts_reference_row() {
        let r = SessionRecord::new(Some("[10,20,30]"), Some("[1,0,2]"), Some("3"), Some("1"));
        let out = FeatureExtractor::new().extract(1, &r).unwrap();
        assert_eq!(
            out.features,
            FeatureVector {
                avg_time: 20.0,
                total_changes: 3.0,
                tab_switch_count: 3.0
            }
        );
        assert_eq!(out.label, Label::Cheating);
    }

    #[test]
    fn all_null_row_is_zero_vector() {
        let r = SessionRecord::new(None, None, None, Some("0"));
        let out = FeatureExtractor::new().extract(1, &r).unwrap();
        assert_eq!(out.features.as_array(), [0.0, 0.0, 0.0]);
        assert_eq!(out.label, Label::NotCheating);
    }

    #[test]
    fn label_must_be_binary() {
        let ex = FeatureExtractor::new();
        for bad in [None, Some("2"), Some("yes"), Some("-1")] {
            let r = SessionRecord::new(None, None, None, bad);
            assert!(matches!(
                ex.extract(3, &r),
                Err(PipelineError::InvalidLabel { row: 3, .. })
            ));
        }
        let r = SessionRecord::new(None, None, None, Some("1.0"));
        assert_eq!(ex.extract(1, &r).unwrap().label, Label::Cheating);
    }

    #[test]
    fn preserves_row_order() {
        let records: Vec<SessionRecord> = (0..10)
            .map(|i| {
                let t = format!("[{}]", i);
                SessionRecord::new(Some(&t), None, None, Some(if i % 2 == 0 { "0" } else { "1" }))
            })
            .collect();
        let ds = FeatureExtractor::new().extract_all(&records).unwrap();
        for (i, row) in ds.rows().iter().enumerate() {
            assert_eq!(row.features.avg_time, i as f64);
        }
    }

    #[test]
    fn bad_row_aborts_batch_with_its_row_number() {
        let records = vec![
            SessionRecord::new(Some("[1]"), None, None, Some("0")),
            SessionRecord::new(Some("eval('x')"), None, None, Some("1")),
        ];
        match FeatureExtractor::new().extract_all(&records) {
            Err(PipelineError::MalformedSequenceField { row, .. }) => assert_eq!(row, 2),
            other => panic!("unexpected: {:?}", other.map(|d| d.len())),
        }
    }
}

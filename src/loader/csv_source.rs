//! CSV reading with header-based column lookup.

use super::SessionRecord;
use crate::error::{PipelineError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Read every record from the CSV file at `path`.
pub fn load_records(path: &Path) -> Result<Vec<SessionRecord>> {
    let file = File::open(path).map_err(|e| PipelineError::InputUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let records = read_from(file, path)?;
    info!(path = %path.display(), rows = records.len(), "loaded session records");
    Ok(records)
}

/// Read every record from an already-open CSV source.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<SessionRecord>> {
    read_from(reader, Path::new("<reader>"))
}

fn read_from<R: Read>(reader: R, path: &Path) -> Result<Vec<SessionRecord>> {
    let unreadable = |reason: String| PipelineError::InputUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| unreadable(e.to_string()))?.clone();
    for required in [
        "timeSpentPerQuestion",
        "answerChangesPerQuestion",
        "tabSwitchCount",
        "label",
    ] {
        if !headers.iter().any(|h| h == required) {
            return Err(unreadable(format!("missing required column {:?}", required)));
        }
    }
    debug!(columns = headers.len(), "csv header ok");

    let mut records = Vec::new();
    for row in rdr.deserialize::<SessionRecord>() {
        let record = row.map_err(|e| unreadable(e.to_string()))?;
        records.push(record.normalize_nulls());
    }
    Ok(records)
}

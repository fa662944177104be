//! JSON artifact holding the fitted forest plus what a scorer needs to feed it.

use crate::error::{PipelineError, Result};
use crate::features::{FeatureVector, Label};
use crate::model::TrainedModel;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Column order the model expects
    pub feature_names: Vec<String>,
    pub classes: Vec<Label>,
    pub model: TrainedModel,
}

impl ModelArtifact {
    pub fn new(model: TrainedModel) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FeatureVector::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            classes: Label::ALL.to_vec(),
            model,
        }
    }
}

pub struct ArtifactStore;

impl ArtifactStore {
    /// Write `model` to `path`, replacing any existing file. The model is consumed.
    pub fn save(model: TrainedModel, path: &Path) -> Result<()> {
        let fail = |reason: String| PipelineError::ArtifactWriteFailure {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
        }

        let artifact = ModelArtifact::new(model);
        let file = File::create(path).map_err(|e| fail(e.to_string()))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer(&mut w, &artifact).map_err(|e| fail(e.to_string()))?;
        w.flush().map_err(|e| fail(e.to_string()))?;

        info!(
            path = %path.display(),
            trees = artifact.model.trees().len(),
            "wrote model artifact"
        );
        Ok(())
    }

    /// Read an artifact back, checking it matches this build's feature layout.
    pub fn load(path: &Path) -> Result<TrainedModel> {
        let fail = |reason: String| PipelineError::ArtifactReadFailure {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| fail(e.to_string()))?;
        let artifact: ModelArtifact =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;

        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(fail(format!(
                "unsupported format version {}",
                artifact.format_version
            )));
        }
        if artifact.feature_names != FeatureVector::FEATURE_NAMES {
            return Err(fail(format!(
                "feature layout {:?} does not match {:?}",
                artifact.feature_names,
                FeatureVector::FEATURE_NAMES
            )));
        }
        Ok(artifact.model)
    }
}

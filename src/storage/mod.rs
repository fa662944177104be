//! Persistent model artifact: the only durable output of a run.

mod artifact;

pub use artifact::{ArtifactStore, ModelArtifact, ARTIFACT_FORMAT_VERSION};

//! Scanned artifact state tracking

use std::path::PathBuf;

use pomsweep_core::Gav;

/// Progression of one discovered descriptor through the pipeline.
///
/// `Failed` is terminal; the other states advance in order. Only `Analyzed`
/// artifacts contribute vertices to the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// Coordinates extracted from the path, nothing checked yet.
    Created,
    /// The descriptor sits at the canonical location for its coordinates.
    Validated,
    /// Descriptor parsed and dependencies resolved.
    Analyzed,
    /// Dropped from further processing.
    Failed { reason: String },
}

impl ArtifactStatus {
    /// Short label for status summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactStatus::Created => "created",
            ArtifactStatus::Validated => "validated",
            ArtifactStatus::Analyzed => "analyzed",
            ArtifactStatus::Failed { .. } => "failed",
        }
    }
}

/// One `.pom` file discovered in the repository, with where the pipeline got
/// to with it.
#[derive(Debug, Clone)]
pub struct ScannedArtifact {
    pub gav: Gav,
    pub pom_path: PathBuf,
    pub status: ArtifactStatus,
}

impl ScannedArtifact {
    pub fn new(gav: Gav, pom_path: PathBuf) -> Self {
        ScannedArtifact {
            gav,
            pom_path,
            status: ArtifactStatus::Created,
        }
    }

    pub fn mark_validated(&mut self) {
        self.status = ArtifactStatus::Validated;
    }

    pub fn mark_analyzed(&mut self) {
        self.status = ArtifactStatus::Analyzed;
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(gav = %self.gav, %reason, "artifact failed analysis");
        self.status = ArtifactStatus::Failed { reason };
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ArtifactStatus::Failed { .. })
    }
}

//! Core data structures for the artifact dependency graph

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maven-style artifact coordinates: groupId, artifactId, version.
///
/// This is the sole key used by every map and set in the engine — two
/// artifacts are the same vertex iff their coordinates are equal.
/// Ordering follows the `group:artifact:version` coordinate string so that
/// sorted report output matches what users see printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gav {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Gav {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Gav {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// The `group:artifact:version` coordinate string.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl Ord for Gav {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coordinate().cmp(&other.coordinate())
    }
}

impl PartialOrd for Gav {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A directed relation between two artifacts: `from` depends on `to`.
///
/// Parent relations are normalized to this direction before they reach the
/// graph (see [`crate::edges::parent_edges`]). An edge `A → B` reads as
/// "deleting B requires first confirming A no longer needs it".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: Gav,
    pub to: Gav,
}

impl Edge {
    pub fn new(from: Gav, to: Gav) -> Self {
        Edge { from, to }
    }
}

/// Fully analyzed metadata for one artifact in the repository.
///
/// Produced by the scanner crate once an artifact's descriptor has been
/// parsed and resolved; the graph engine treats it as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedArtifact {
    pub gav: Gav,
    /// The descriptor file this metadata came from.
    pub pom_path: PathBuf,
    /// Direct dependencies declared (or managed) by this artifact.
    pub direct_dependencies: BTreeSet<Gav>,
    /// Declared parent coordinates, when the descriptor has a `<parent>`.
    pub parents: BTreeSet<Gav>,
}

//! Pomsweep Core — artifact identity, dependency graph, and cleanup planning

pub mod closure;
pub mod distance;
pub mod edges;
pub mod graph;
pub mod model;

pub use closure::{CleanupPlan, plan_cleanup};
pub use distance::CYCLE_SENTINEL;
pub use edges::{dependency_edges, inherited_dependency_edges, parent_edges};
pub use graph::DependencyGraph;
pub use model::{AnalyzedArtifact, Edge, Gav};

//! Edge extraction from analyzed artifact metadata
//!
//! The graph builder accepts any number of edge sets; these functions produce
//! the three sets pomsweep feeds it:
//!
//! 1. declared (and managed) dependency edges,
//! 2. parent edges, re-oriented so the parent points at the child,
//! 3. edges from an artifact to the direct dependencies of its transitive
//!    parents, which the child effectively inherits.
//!
//! Targets that were never analyzed are left in; the builder drops them.

use std::collections::{BTreeSet, HashMap};

use crate::model::{AnalyzedArtifact, Edge, Gav};

/// One edge per declared direct dependency: `artifact → dependency`.
pub fn dependency_edges(vertices: &HashMap<Gav, AnalyzedArtifact>) -> BTreeSet<Edge> {
    vertices
        .values()
        .flat_map(|artifact| {
            artifact
                .direct_dependencies
                .iter()
                .map(|dep| Edge::new(artifact.gav.clone(), dep.clone()))
        })
        .collect()
}

/// One edge per declared parent, oriented `parent → child`.
///
/// The parent is treated as a dependant of the child: deleting the parent
/// requires the child to be accounted for first, which keeps parent relations
/// consistent with the dependency direction used for distance and closure.
pub fn parent_edges(vertices: &HashMap<Gav, AnalyzedArtifact>) -> BTreeSet<Edge> {
    vertices
        .values()
        .flat_map(|artifact| {
            artifact
                .parents
                .iter()
                .map(|parent| Edge::new(parent.clone(), artifact.gav.clone()))
        })
        .collect()
}

/// Edges from each artifact to the direct dependencies of every transitive
/// parent: a child needs what its ancestors declare.
///
/// The parent walk only follows ancestors that were themselves analyzed and
/// is guarded against parent cycles (malformed but possible on disk).
pub fn inherited_dependency_edges(vertices: &HashMap<Gav, AnalyzedArtifact>) -> BTreeSet<Edge> {
    let mut edges = BTreeSet::new();

    for artifact in vertices.values() {
        for ancestor in transitive_parents(&artifact.gav, vertices) {
            if let Some(parent_artifact) = vertices.get(&ancestor) {
                for dep in &parent_artifact.direct_dependencies {
                    edges.insert(Edge::new(artifact.gav.clone(), dep.clone()));
                }
            }
        }
    }

    edges
}

fn transitive_parents(gav: &Gav, vertices: &HashMap<Gav, AnalyzedArtifact>) -> BTreeSet<Gav> {
    let mut ancestors = BTreeSet::new();
    let mut to_visit: Vec<Gav> = match vertices.get(gav) {
        Some(artifact) => artifact.parents.iter().cloned().collect(),
        None => Vec::new(),
    };

    while let Some(parent) = to_visit.pop() {
        if !ancestors.insert(parent.clone()) {
            continue;
        }
        if let Some(parent_artifact) = vertices.get(&parent) {
            to_visit.extend(parent_artifact.parents.iter().cloned());
        }
    }

    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn gav(name: &str) -> Gav {
        Gav::new("org.test", name, "1.0")
    }

    fn artifact(name: &str, deps: &[&str], parents: &[&str]) -> (Gav, AnalyzedArtifact) {
        let g = gav(name);
        (
            g.clone(),
            AnalyzedArtifact {
                gav: g,
                pom_path: PathBuf::from(format!("{name}.pom")),
                direct_dependencies: deps.iter().map(|d| gav(d)).collect(),
                parents: parents.iter().map(|p| gav(p)).collect(),
            },
        )
    }

    #[test]
    fn dependency_edges_point_from_artifact_to_dependency() {
        let vertices: HashMap<Gav, AnalyzedArtifact> =
            [artifact("app", &["lib"], &[]), artifact("lib", &[], &[])]
                .into_iter()
                .collect();
        let edges = dependency_edges(&vertices);
        assert_eq!(
            edges,
            [Edge::new(gav("app"), gav("lib"))].into_iter().collect()
        );
    }

    #[test]
    fn parent_edges_are_reoriented_parent_to_child() {
        let vertices: HashMap<Gav, AnalyzedArtifact> = [
            artifact("child", &[], &["parent"]),
            artifact("parent", &[], &[]),
        ]
        .into_iter()
        .collect();

        let edges = parent_edges(&vertices);
        assert_eq!(
            edges,
            [Edge::new(gav("parent"), gav("child"))]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn children_inherit_dependencies_of_all_ancestors() {
        let vertices: HashMap<Gav, AnalyzedArtifact> = [
            artifact("child", &[], &["parent"]),
            artifact("parent", &["shared"], &["grandparent"]),
            artifact("grandparent", &["base"], &[]),
            artifact("shared", &[], &[]),
            artifact("base", &[], &[]),
        ]
        .into_iter()
        .collect();

        let edges = inherited_dependency_edges(&vertices);
        assert!(edges.contains(&Edge::new(gav("child"), gav("shared"))));
        assert!(edges.contains(&Edge::new(gav("child"), gav("base"))));
        assert!(edges.contains(&Edge::new(gav("parent"), gav("base"))));
        // grandparent has no ancestors, so it inherits nothing.
        assert!(!edges.iter().any(|e| e.from == gav("grandparent")));
    }

    #[test]
    fn parent_cycle_does_not_hang_the_walk() {
        let vertices: HashMap<Gav, AnalyzedArtifact> = [
            artifact("a", &["dep-a"], &["b"]),
            artifact("b", &["dep-b"], &["a"]),
            artifact("dep-a", &[], &[]),
            artifact("dep-b", &[], &[]),
        ]
        .into_iter()
        .collect();

        let edges = inherited_dependency_edges(&vertices);
        assert!(edges.contains(&Edge::new(gav("a"), gav("dep-b"))));
        assert!(edges.contains(&Edge::new(gav("b"), gav("dep-a"))));
    }

    #[test]
    fn unanalyzed_parents_contribute_nothing() {
        let vertices: HashMap<Gav, AnalyzedArtifact> =
            [artifact("child", &[], &["missing"])].into_iter().collect();
        assert!(inherited_dependency_edges(&vertices).is_empty());
        // The parent edge itself is still emitted; the builder drops it later.
        assert_eq!(parent_edges(&vertices).len(), 1);
    }
}

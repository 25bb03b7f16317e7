//! Graph wrapper using petgraph::DiGraph with a Gav → NodeIndex map

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::distance;
use crate::model::{AnalyzedArtifact, Edge, Gav};

/// The artifact dependency graph — a directed graph over [`Gav`] vertices.
///
/// An edge `A → B` means "A depends on B". Built once per run from the
/// scanner's output; immutable afterwards. Unknown-endpoint edges (references
/// to artifacts that were never successfully analyzed) are filtered during
/// construction and never appear downstream.
pub struct DependencyGraph {
    vertices: HashMap<Gav, AnalyzedArtifact>,
    graph: DiGraph<Gav, ()>,
    node_map: HashMap<Gav, NodeIndex>,
    distance_from_root: HashMap<Gav, u32>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("vertex_count", &self.graph.node_count())
            .field("edge_count", &self.graph.edge_count())
            .finish()
    }
}

impl DependencyGraph {
    /// Assemble the graph from analyzed vertices and any number of
    /// independently computed edge sets.
    ///
    /// Edges referencing a coordinate that is not a key in `vertices` are
    /// silently discarded: artifacts whose metadata could not be resolved are
    /// invisible to the graph, they never fail the build. Duplicate edges
    /// across sources collapse to a single graph edge.
    pub fn build(vertices: HashMap<Gav, AnalyzedArtifact>, edge_sources: &[BTreeSet<Edge>]) -> Self {
        let mut graph = DiGraph::<Gav, ()>::new();
        let mut node_map: HashMap<Gav, NodeIndex> = HashMap::with_capacity(vertices.len());

        for gav in vertices.keys() {
            let idx = graph.add_node(gav.clone());
            node_map.insert(gav.clone(), idx);
        }

        let mut dropped = 0usize;
        for edge in edge_sources.iter().flatten() {
            let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to))
            else {
                dropped += 1;
                continue;
            };
            if !graph.contains_edge(from, to) {
                graph.add_edge(from, to, ());
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "edges referencing unanalyzed artifacts were dropped");
        }

        let distance_from_root = distance::compute_distances(&graph);

        DependencyGraph {
            vertices,
            graph,
            node_map,
            distance_from_root,
        }
    }

    /// Number of artifacts in the graph.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of (deduplicated) dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the coordinate is a vertex of this graph.
    pub fn contains(&self, gav: &Gav) -> bool {
        self.node_map.contains_key(gav)
    }

    /// The analyzed metadata for a vertex.
    pub fn artifact(&self, gav: &Gav) -> Option<&AnalyzedArtifact> {
        self.vertices.get(gav)
    }

    /// Iterate over all vertex coordinates.
    pub fn gavs(&self) -> impl Iterator<Item = &Gav> {
        self.vertices.keys()
    }

    /// Everything `gav` directly depends on. Unknown coordinates yield an
    /// empty set rather than an error.
    pub fn direct_dependencies(&self, gav: &Gav) -> BTreeSet<Gav> {
        self.neighbors(gav, Direction::Outgoing)
    }

    /// Everything that directly depends on `gav`.
    pub fn direct_dependants(&self, gav: &Gav) -> BTreeSet<Gav> {
        self.neighbors(gav, Direction::Incoming)
    }

    fn neighbors(&self, gav: &Gav, dir: Direction) -> BTreeSet<Gav> {
        let Some(&idx) = self.node_map.get(gav) else {
            return BTreeSet::new();
        };
        self.graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Minimum number of hops from `gav` to a vertex nothing depends on.
    ///
    /// Roots themselves have distance 1. Values at or above
    /// [`crate::distance::CYCLE_SENTINEL`] mean the vertex sits on (or
    /// behind) a dependency cycle and the value is not a true hop count.
    pub fn distance_from_root(&self, gav: &Gav) -> Option<u32> {
        self.distance_from_root.get(gav).copied()
    }

    /// The full distance map, one entry per vertex.
    pub fn distances(&self) -> &HashMap<Gav, u32> {
        &self.distance_from_root
    }

    /// Vertex counts grouped by distance, sorted by distance.
    pub fn distance_histogram(&self) -> BTreeMap<u32, usize> {
        let mut histogram = BTreeMap::new();
        for distance in self.distance_from_root.values() {
            *histogram.entry(*distance).or_insert(0) += 1;
        }
        histogram
    }

    /// All graph roots: artifacts no other artifact depends on.
    pub fn roots(&self) -> BTreeSet<Gav> {
        self.distance_from_root
            .iter()
            .filter(|&(_, &d)| d == 1)
            .map(|(gav, _)| gav.clone())
            .collect()
    }
}

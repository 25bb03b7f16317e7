//! Distance-from-root computation over the dependant relation

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::Gav;

/// Provisional distance recorded for a vertex while its dependants are still
/// being explored. A vertex revisited through a dependency cycle sees this
/// value instead of recursing forever, so cycle members end up with distances
/// at or above the sentinel. Callers must treat such values as "possibly
/// cyclic, unreliable" rather than a true hop count.
pub const CYCLE_SENTINEL: u32 = 1000;

enum Step {
    Visit(NodeIndex),
    Finish(NodeIndex),
}

/// Compute the distance to the nearest root for every vertex.
///
/// A root is a vertex with no dependants (no incoming edge); its distance is
/// 1. Any other vertex gets `1 + min(distance of its dependants)`. Memoized,
/// each vertex finished exactly once. Uses an explicit work stack so that
/// pathologically deep dependency chains cannot exhaust the call stack.
pub(crate) fn compute_distances(graph: &DiGraph<Gav, ()>) -> HashMap<Gav, u32> {
    let mut memo: HashMap<NodeIndex, u32> = HashMap::with_capacity(graph.node_count());
    let mut stack: Vec<Step> = Vec::new();

    for start in graph.node_indices() {
        stack.push(Step::Visit(start));

        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(vertex) => {
                    if memo.contains_key(&vertex) {
                        continue;
                    }
                    // Mark before exploring so a cycle back to this vertex
                    // short-circuits on the sentinel.
                    memo.insert(vertex, CYCLE_SENTINEL);
                    stack.push(Step::Finish(vertex));
                    for dependant in graph.neighbors_directed(vertex, Direction::Incoming) {
                        if !memo.contains_key(&dependant) {
                            stack.push(Step::Visit(dependant));
                        }
                    }
                }
                Step::Finish(vertex) => {
                    let nearest = graph
                        .neighbors_directed(vertex, Direction::Incoming)
                        .filter_map(|dependant| memo.get(&dependant))
                        .min()
                        .copied()
                        .unwrap_or(0);
                    memo.insert(vertex, nearest + 1);
                }
            }
        }
    }

    graph
        .node_indices()
        .map(|idx| (graph[idx].clone(), memo[&idx]))
        .collect()
}

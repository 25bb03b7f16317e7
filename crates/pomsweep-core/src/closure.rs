//! Transitive dependency closure and cleanup planning

use std::collections::BTreeSet;

use crate::graph::DependencyGraph;
use crate::model::Gav;

impl DependencyGraph {
    /// Collect everything transitively reachable from `seeds` by following
    /// the dependency relation.
    ///
    /// Expansion stops at coordinates already in `already_collected` (and at
    /// anything collected in an earlier round), which both guarantees
    /// termination on cyclic graphs and lets callers chain calls without
    /// re-expanding work they have already paid for. Seeds themselves are
    /// always part of the result, even seeds that are not graph vertices
    /// (those contribute no further edges). Empty seeds yield an empty set.
    pub fn transitive_dependencies(
        &self,
        seeds: &BTreeSet<Gav>,
        already_collected: &BTreeSet<Gav>,
    ) -> BTreeSet<Gav> {
        let mut result: BTreeSet<Gav> = BTreeSet::new();
        let mut collected = already_collected.clone();
        let mut frontier = seeds.clone();

        while !frontier.is_empty() {
            result.extend(frontier.iter().cloned());

            let mut dependencies: BTreeSet<Gav> = BTreeSet::new();
            for gav in &frontier {
                dependencies.extend(self.direct_dependencies(gav));
            }

            collected.extend(frontier);
            frontier = dependencies.difference(&collected).cloned().collect();
        }

        result
    }
}

/// The outcome of a cleanup query: which artifacts the focus set transitively
/// requires, which must be preserved for the keep set, and the difference —
/// what can go.
///
/// Nothing here deletes anything; rendering and acting on the plan is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Closure of the artifacts matching the focus criterion.
    pub focus_closure: BTreeSet<Gav>,
    /// Closure of the artifacts matching the keep criterion.
    pub keep_closure: BTreeSet<Gav>,
    /// Focus closure minus keep closure: safe to delete without breaking
    /// anything the keep set needs.
    pub removable: BTreeSet<Gav>,
}

/// Compute cleanup candidates from two caller-supplied predicates over the
/// graph's vertices.
///
/// `focus` selects the artifacts the user wants gone; `keep` selects the
/// artifacts that must keep working. An artifact is removable when the focus
/// set requires it but the keep set does not.
pub fn plan_cleanup<F, K>(graph: &DependencyGraph, focus: F, keep: K) -> CleanupPlan
where
    F: Fn(&Gav) -> bool,
    K: Fn(&Gav) -> bool,
{
    let focus_seeds: BTreeSet<Gav> = graph.gavs().filter(|g| focus(g)).cloned().collect();
    let keep_seeds: BTreeSet<Gav> = graph.gavs().filter(|g| keep(g)).cloned().collect();

    let focus_closure = graph.transitive_dependencies(&focus_seeds, &BTreeSet::new());
    let keep_closure = graph.transitive_dependencies(&keep_seeds, &BTreeSet::new());
    let removable = focus_closure.difference(&keep_closure).cloned().collect();

    CleanupPlan {
        focus_closure,
        keep_closure,
        removable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{build_graph, gav};

    fn seeds(names: &[&str]) -> BTreeSet<Gav> {
        names.iter().map(|n| gav(n)).collect()
    }

    #[test]
    fn empty_seeds_yield_empty_closure() {
        let graph = build_graph(&["a", "b"], &[("a", "b")]);
        let closure = graph.transitive_dependencies(&BTreeSet::new(), &BTreeSet::new());
        assert!(closure.is_empty());
    }

    #[test]
    fn closure_contains_seeds_and_reachable_vertices_only() {
        let graph = build_graph(
            &["app", "lib", "util", "unrelated"],
            &[("app", "lib"), ("lib", "util"), ("unrelated", "util")],
        );
        let closure = graph.transitive_dependencies(&seeds(&["app"]), &BTreeSet::new());
        assert_eq!(closure, seeds(&["app", "lib", "util"]));
    }

    #[test]
    fn closure_is_idempotent() {
        let graph = build_graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d")],
        );
        let once = graph.transitive_dependencies(&seeds(&["a"]), &BTreeSet::new());
        let twice = graph.transitive_dependencies(&once, &BTreeSet::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn closure_terminates_on_cycles() {
        let graph = build_graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let closure = graph.transitive_dependencies(&seeds(&["a"]), &BTreeSet::new());
        assert_eq!(closure, seeds(&["a", "b", "c"]));
    }

    #[test]
    fn already_collected_coordinates_are_not_reexpanded() {
        let graph = build_graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        // b is already accounted for, so expansion never reaches c through it.
        let closure = graph.transitive_dependencies(&seeds(&["a"]), &seeds(&["b"]));
        assert_eq!(closure, seeds(&["a"]));
    }

    #[test]
    fn non_vertex_seeds_survive_into_the_result() {
        let graph = build_graph(&["a"], &[]);
        let stranger = Gav::new("org.elsewhere", "ghost", "9.9");
        let mut s = BTreeSet::new();
        s.insert(stranger.clone());
        let closure = graph.transitive_dependencies(&s, &BTreeSet::new());
        assert_eq!(closure, [stranger].into_iter().collect());
    }

    #[test]
    fn cleanup_plan_excludes_shared_dependencies() {
        // A → C, B → C, B → D. Removing A must not take C with it, because
        // B (kept) still needs C.
        let graph = build_graph(
            &["a", "b", "c", "d"],
            &[("a", "c"), ("b", "c"), ("b", "d")],
        );
        let plan = plan_cleanup(
            &graph,
            |g| g.artifact_id == "a",
            |g| g.artifact_id == "b",
        );

        assert_eq!(plan.focus_closure, seeds(&["a", "c"]));
        assert_eq!(plan.keep_closure, seeds(&["b", "c", "d"]));
        assert_eq!(plan.removable, seeds(&["a"]));
    }

    #[test]
    fn cleanup_with_no_keep_matches_removes_the_whole_focus_closure() {
        let graph = build_graph(&["a", "b"], &[("a", "b")]);
        let plan = plan_cleanup(&graph, |g| g.artifact_id == "a", |_| false);
        assert_eq!(plan.removable, seeds(&["a", "b"]));
        assert!(plan.keep_closure.is_empty());
    }
}

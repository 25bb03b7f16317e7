//! Integration tests for Pomsweep
//!
//! These tests synthesize a small Maven repository on disk and drive the
//! whole pipeline: scan → analyze → graph → cleanup plan.

use std::fs;
use std::path::Path;

use pomsweep_core::{CYCLE_SENTINEL, Gav, plan_cleanup};
use pomsweep_scanner::{NullProgress, analyze_and_build, expected_pom_path};
use tempfile::TempDir;

fn write_pom(root: &Path, gav: &Gav, body: &str) {
    let path = expected_pom_path(root, gav);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdirs");
    fs::write(path, body).expect("write pom");
}

fn pom(gav: &Gav, deps: &[&Gav], parent: Option<&Gav>) -> String {
    let mut xml = String::from("<project>");
    if let Some(parent) = parent {
        xml.push_str(&format!(
            "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>",
            parent.group_id, parent.artifact_id, parent.version
        ));
    }
    xml.push_str(&format!(
        "<groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>",
        gav.group_id, gav.artifact_id, gav.version
    ));
    if !deps.is_empty() {
        xml.push_str("<dependencies>");
        for dep in deps {
            xml.push_str(&format!(
                "<dependency><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></dependency>",
                dep.group_id, dep.artifact_id, dep.version
            ));
        }
        xml.push_str("</dependencies>");
    }
    xml.push_str("</project>");
    xml
}

fn gav(artifact: &str, version: &str) -> Gav {
    Gav::new("org.example", artifact, version)
}

/// The scenario from the cleanup design: A → C, B → C, B → D. Removing `a`
/// must not delete the shared dependency C.
#[test]
fn end_to_end_cleanup_plan_spares_shared_dependencies() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    let a = gav("app-a", "1.0");
    let b = gav("app-b", "1.0");
    let c = gav("common", "1.0");
    let d = gav("extra", "1.0");
    write_pom(root, &a, &pom(&a, &[&c], None));
    write_pom(root, &b, &pom(&b, &[&c, &d], None));
    write_pom(root, &c, &pom(&c, &[], None));
    write_pom(root, &d, &pom(&d, &[], None));

    let (analysis, graph) = analyze_and_build(root, &NullProgress).expect("analyze");
    assert_eq!(analysis.status_counts().get("analyzed"), Some(&4));
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 3);

    let plan = plan_cleanup(
        &graph,
        |g| g.artifact_id == "app-a",
        |g| g.artifact_id == "app-b",
    );
    assert_eq!(plan.removable, [a.clone()].into_iter().collect());
    assert!(plan.focus_closure.contains(&c));
    assert!(plan.keep_closure.contains(&d));
}

/// Parent relations flow into the graph re-oriented (parent → child) and
/// inherited dependencies become child edges.
#[test]
fn end_to_end_parent_handling() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    let parent = gav("parent", "2.0");
    let child = gav("child", "2.0");
    let shared = gav("shared", "2.0");
    write_pom(root, &parent, &pom(&parent, &[&shared], None));
    write_pom(root, &child, &pom(&child, &[], Some(&parent)));
    write_pom(root, &shared, &pom(&shared, &[], None));

    let (_, graph) = analyze_and_build(root, &NullProgress).expect("analyze");

    // Parent edge is parent → child.
    assert!(graph.direct_dependencies(&parent).contains(&child));
    assert!(graph.direct_dependants(&child).contains(&parent));
    // The child inherits the parent's dependency.
    assert!(graph.direct_dependencies(&child).contains(&shared));
    // Nothing depends on the parent, so it is a root.
    assert_eq!(graph.distance_from_root(&parent), Some(1));
}

/// A dependency cycle on disk neither hangs the pipeline nor errors; the
/// distance values for cycle members are sentinel-inflated.
#[test]
fn end_to_end_cycles_terminate() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    let ping = gav("ping", "1.0");
    let pong = gav("pong", "1.0");
    write_pom(root, &ping, &pom(&ping, &[&pong], None));
    write_pom(root, &pong, &pom(&pong, &[&ping], None));

    let (_, graph) = analyze_and_build(root, &NullProgress).expect("analyze");
    assert_eq!(graph.vertex_count(), 2);
    assert!(graph.distance_from_root(&ping).expect("ping") >= CYCLE_SENTINEL);
    assert!(graph.distance_from_root(&pong).expect("pong") >= CYCLE_SENTINEL);

    // Closure still terminates and covers the whole cycle.
    let closure = graph.transitive_dependencies(
        &[ping.clone()].into_iter().collect(),
        &Default::default(),
    );
    assert_eq!(closure, [ping, pong].into_iter().collect());
}

/// An empty repository produces an empty but well-formed result.
#[test]
fn end_to_end_empty_repository() {
    let dir = TempDir::new().expect("tempdir");
    let (analysis, graph) = analyze_and_build(dir.path(), &NullProgress).expect("analyze");
    assert!(analysis.artifacts.is_empty());
    assert_eq!(graph.vertex_count(), 0);
    assert!(graph.roots().is_empty());
}

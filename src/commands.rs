//! CLI command implementations

use std::path::Path;

use clap::ValueEnum;
use pomsweep_core::{CYCLE_SENTINEL, DependencyGraph, Gav, plan_cleanup};
use pomsweep_scanner::{Analysis, ConsoleProgress, NullProgress, ProgressListener, analyze_and_build};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn scan(repo: &Path) -> anyhow::Result<()> {
    let (analysis, graph) = analyze_and_build(repo, &ConsoleProgress)?;

    print_summary(&analysis, &graph);

    println!();
    println!("Distance from root:");
    for (distance, count) in graph.distance_histogram() {
        if distance >= CYCLE_SENTINEL {
            println!("  {distance} ({count})  [on or behind a cycle, not a true hop count]");
        } else {
            println!("  {distance} ({count})");
        }
    }

    println!();
    println!("Roots (nothing depends on them):");
    for gav in graph.roots() {
        println!("  {gav}");
    }

    Ok(())
}

pub fn inspect(repo: &Path, pattern: &str) -> anyhow::Result<()> {
    let (_, graph) = analyze_and_build(repo, &ConsoleProgress)?;

    let mut matches: Vec<&Gav> = graph
        .gavs()
        .filter(|gav| gav.coordinate().contains(pattern))
        .collect();
    matches.sort();

    if matches.is_empty() {
        println!("No artifacts match `{pattern}`");
        return Ok(());
    }

    for gav in matches {
        let distance = graph
            .distance_from_root(gav)
            .map_or_else(|| "?".to_string(), |d| d.to_string());
        println!("{gav}  (distance {distance})");

        let dependants = graph.direct_dependants(gav);
        println!("  depended on by ({}):", dependants.len());
        for dependant in dependants {
            println!("    {dependant}");
        }

        let dependencies = graph.direct_dependencies(gav);
        println!("  depends on ({}):", dependencies.len());
        for dependency in dependencies {
            println!("    {dependency}");
        }
    }

    Ok(())
}

pub fn plan(
    repo: &Path,
    remove: &str,
    keep: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    // Dots would corrupt machine-readable output.
    let progress: &dyn ProgressListener = match format {
        OutputFormat::Text => &ConsoleProgress,
        OutputFormat::Json => &NullProgress,
    };
    let (_, graph) = analyze_and_build(repo, progress)?;

    let plan = plan_cleanup(
        &graph,
        |gav| gav.coordinate().contains(remove),
        |gav| keep.is_some_and(|pattern| gav.coordinate().contains(pattern)),
    );

    match format {
        OutputFormat::Text => {
            println!(
                "Removal set requires {} artifacts; keep set requires {}.",
                plan.focus_closure.len(),
                plan.keep_closure.len()
            );
            println!("Safe to delete ({}):", plan.removable.len());
            for gav in &plan.removable {
                println!("  {gav}");
            }
            println!();
            println!("Nothing was deleted. Pomsweep only reports.");
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "repository": repo.display().to_string(),
                "remove_pattern": remove,
                "keep_pattern": keep,
                "focus_closure_size": plan.focus_closure.len(),
                "keep_closure_size": plan.keep_closure.len(),
                "removable": plan
                    .removable
                    .iter()
                    .map(Gav::coordinate)
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_summary(analysis: &Analysis, graph: &DependencyGraph) {
    println!("Descriptors by status:");
    for (status, count) in analysis.status_counts() {
        println!("  {status}: {count}");
    }
    println!();
    println!(
        "Graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
}

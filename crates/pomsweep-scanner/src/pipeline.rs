//! Analysis pipeline: scan → extract → validate → parse → resolve
//!
//! Orchestrates the whole scanner over a repository root. Work is chunked so
//! progress can be reported coarsely; descriptor parsing, the only
//! I/O-and-CPU heavy phase, fans out over a rayon pool per chunk. Individual
//! artifact failures are recorded on the artifact and never abort the run.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use pomsweep_core::{
    AnalyzedArtifact, DependencyGraph, Gav, dependency_edges, inherited_dependency_edges,
    parent_edges,
};
use rayon::prelude::*;

use crate::artifact::{ArtifactStatus, ScannedArtifact};
use crate::descriptor::{RawModel, parse_pom};
use crate::layout::{expected_pom_path, gav_from_path, scan_repository};
use crate::progress::ProgressListener;
use crate::resolve::Resolver;

/// Items per progress tick, and per parallel parse batch.
const CHUNK: usize = 100;

/// Everything the pipeline learned about a repository.
pub struct Analysis {
    /// Every discovered descriptor with its final status.
    pub artifacts: Vec<ScannedArtifact>,
    /// Fully resolved metadata, keyed by coordinates. Input for the graph.
    pub analyzed: HashMap<Gav, AnalyzedArtifact>,
}

impl Analysis {
    /// Artifact counts per status label, for the scan summary.
    pub fn status_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for artifact in &self.artifacts {
            *counts.entry(artifact.status.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Build the dependency graph from the analyzed artifacts, feeding the
    /// builder all three edge sources: declared dependencies, re-oriented
    /// parent relations, and dependencies inherited from transitive parents.
    pub fn build_graph(&self) -> DependencyGraph {
        let edge_sources = [
            dependency_edges(&self.analyzed),
            parent_edges(&self.analyzed),
            inherited_dependency_edges(&self.analyzed),
        ];
        DependencyGraph::build(self.analyzed.clone(), &edge_sources)
    }
}

/// Run the full pipeline over a repository root.
pub fn analyze_repository(root: &Path, progress: &dyn ProgressListener) -> Result<Analysis> {
    ensure!(
        root.is_dir(),
        "repository root `{}` is not a directory",
        root.display()
    );

    let poms = scan_repository(root);
    tracing::info!(count = poms.len(), root = %root.display(), "found descriptor files");

    // Phase 1: derive coordinates from descriptor locations.
    progress.phase_started("extracting coordinates", poms.len());
    let mut artifacts: Vec<ScannedArtifact> = Vec::with_capacity(poms.len());
    for chunk in poms.chunks(CHUNK) {
        for pom_path in chunk {
            match gav_from_path(root, pom_path) {
                Ok(gav) => artifacts.push(ScannedArtifact::new(gav, pom_path.clone())),
                Err(err) => {
                    tracing::warn!(path = %pom_path.display(), %err, "cannot derive coordinates");
                }
            }
        }
        progress.tick(chunk.len());
    }
    progress.phase_finished();

    // Phase 2: check each descriptor sits at its canonical location.
    progress.phase_started("validating layout", artifacts.len());
    for chunk in artifacts.chunks_mut(CHUNK) {
        for artifact in chunk.iter_mut() {
            if expected_pom_path(root, &artifact.gav) == artifact.pom_path {
                artifact.mark_validated();
            } else {
                artifact.mark_failed(format!(
                    "descriptor not at canonical location, expected `{}`",
                    expected_pom_path(root, &artifact.gav).display()
                ));
            }
        }
        progress.tick(chunk.len());
    }
    progress.phase_finished();

    // Phase 3: parse descriptors, in parallel per chunk.
    progress.phase_started("reading descriptors", artifacts.len());
    let mut models: HashMap<Gav, RawModel> = HashMap::new();
    let mut failures: Vec<(usize, String)> = Vec::new();
    let indexed: Vec<usize> = (0..artifacts.len())
        .filter(|&i| artifacts[i].status == ArtifactStatus::Validated)
        .collect();
    for chunk in indexed.chunks(CHUNK) {
        let parsed: Vec<(usize, std::result::Result<RawModel, String>)> = chunk
            .par_iter()
            .map(|&i| {
                let artifact = &artifacts[i];
                let outcome = fs::read_to_string(&artifact.pom_path)
                    .map_err(|err| format!("cannot read descriptor: {err}"))
                    .and_then(|content| {
                        parse_pom(&content).map_err(|err| err.to_string())
                    });
                (i, outcome)
            })
            .collect();
        for (i, outcome) in parsed {
            match outcome {
                Ok(model) => {
                    models.insert(artifacts[i].gav.clone(), model);
                }
                Err(reason) => failures.push((i, reason)),
            }
        }
        progress.tick(chunk.len());
    }
    for (i, reason) in failures {
        artifacts[i].mark_failed(reason);
    }
    progress.phase_finished();

    // Phase 4: resolve dependencies against everything parsed.
    progress.phase_started("resolving dependencies", models.len());
    let resolver = Resolver::new(&models);
    let mut analyzed: HashMap<Gav, AnalyzedArtifact> = HashMap::new();
    let mut processed = 0usize;
    for artifact in &mut artifacts {
        if artifact.status != ArtifactStatus::Validated || !models.contains_key(&artifact.gav) {
            continue;
        }
        match resolver.resolve(&artifact.gav, &artifact.pom_path) {
            Ok(resolved) => {
                analyzed.insert(resolved.gav.clone(), resolved);
                artifact.mark_analyzed();
            }
            Err(err) => artifact.mark_failed(err.to_string()),
        }
        processed += 1;
        if processed % CHUNK == 0 {
            progress.tick(CHUNK);
        }
    }
    progress.phase_finished();

    let analysis = Analysis {
        artifacts,
        analyzed,
    };
    for (status, count) in analysis.status_counts() {
        tracing::info!(status, count, "pipeline summary");
    }
    Ok(analysis)
}

/// Convenience wrapper: run the pipeline and build the graph in one call.
pub fn analyze_and_build(root: &Path, progress: &dyn ProgressListener) -> Result<(Analysis, DependencyGraph)> {
    let analysis =
        analyze_repository(root, progress).context("repository analysis failed")?;
    let graph = analysis.build_graph();
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "dependency graph ready"
    );
    Ok((analysis, graph))
}

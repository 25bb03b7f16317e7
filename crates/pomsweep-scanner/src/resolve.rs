//! Local dependency resolution
//!
//! Turns parsed [`RawModel`]s into [`AnalyzedArtifact`]s using only what is
//! on disk: coordinates inherited from the parent block, `${...}` property
//! interpolation along the parent chain, and managed-version lookup through
//! `<dependencyManagement>`. Anything that cannot be pinned to a literal
//! version locally (missing property, version range) is skipped — it simply
//! contributes no edge. Remote resolution is out of scope by design.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use pomsweep_core::{AnalyzedArtifact, Gav};
use thiserror::Error;

use crate::descriptor::{RawDependency, RawModel};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("descriptor declares no artifactId")]
    MissingArtifactId,
    #[error("no groupId declared or inherited for `{0}`")]
    MissingGroupId(String),
    #[error("no version declared or inherited for `{0}`")]
    MissingVersion(String),
    #[error("descriptor declares `{declared}` but was found at the location of `{derived}`")]
    CoordinateMismatch { declared: Gav, derived: Gav },
    #[error("no parsed descriptor for `{0}`")]
    UnknownModel(Gav),
}

/// Resolves artifacts against the full set of parsed descriptors, so parent
/// chains can be walked without touching the filesystem again.
pub struct Resolver<'a> {
    models: &'a HashMap<Gav, RawModel>,
}

impl<'a> Resolver<'a> {
    pub fn new(models: &'a HashMap<Gav, RawModel>) -> Self {
        Resolver { models }
    }

    /// Resolve the artifact whose path-derived coordinates are `gav`.
    ///
    /// Fails when the declared coordinates cannot be completed from the
    /// descriptor and its parent block, or when they disagree with where the
    /// file actually lives.
    pub fn resolve(&self, gav: &Gav, pom_path: &Path) -> Result<AnalyzedArtifact, ResolveError> {
        let raw = self
            .models
            .get(gav)
            .ok_or_else(|| ResolveError::UnknownModel(gav.clone()))?;

        let declared = effective_gav(raw)?;
        if declared != *gav {
            return Err(ResolveError::CoordinateMismatch {
                declared,
                derived: gav.clone(),
            });
        }

        let ancestors = self.ancestors(raw);
        let properties = gather_properties(&declared, raw, &ancestors);

        let mut direct_dependencies = BTreeSet::new();
        for dep in raw.dependencies.iter().chain(&raw.managed_dependencies) {
            match self.resolve_dependency(dep, raw, &ancestors, &properties) {
                Some(dep_gav) => {
                    direct_dependencies.insert(dep_gav);
                }
                None => {
                    tracing::debug!(
                        artifact = %gav,
                        group = dep.group_id.as_deref().unwrap_or("?"),
                        name = dep.artifact_id.as_deref().unwrap_or("?"),
                        "skipping dependency without a locally resolvable version"
                    );
                }
            }
        }

        let parents: BTreeSet<Gav> = parent_ref_gav(raw).into_iter().collect();

        Ok(AnalyzedArtifact {
            gav: declared,
            pom_path: pom_path.to_path_buf(),
            direct_dependencies,
            parents,
        })
    }

    /// The artifact's parent chain, nearest first, restricted to parents
    /// whose descriptors were parsed. Guarded against declaration cycles.
    fn ancestors(&self, raw: &RawModel) -> Vec<&'a RawModel> {
        let mut chain = Vec::new();
        let mut seen: BTreeSet<Gav> = BTreeSet::new();
        let mut next = parent_ref_gav(raw);

        while let Some(parent_gav) = next {
            if !seen.insert(parent_gav.clone()) {
                break;
            }
            match self.models.get(&parent_gav) {
                Some(parent) => {
                    next = parent_ref_gav(parent);
                    chain.push(parent);
                }
                None => break,
            }
        }

        chain
    }

    fn resolve_dependency(
        &self,
        dep: &RawDependency,
        raw: &RawModel,
        ancestors: &[&RawModel],
        properties: &BTreeMap<String, String>,
    ) -> Option<Gav> {
        let group = interpolate(dep.group_id.as_deref()?, properties)?;
        let artifact = interpolate(dep.artifact_id.as_deref()?, properties)?;

        let version = match &dep.version {
            Some(version) => interpolate(version, properties)?,
            None => managed_version(&group, &artifact, raw, ancestors, properties)?,
        };

        // Version ranges cannot be resolved locally; not a goal.
        if version.starts_with('[') || version.starts_with('(') {
            return None;
        }

        Some(Gav::new(group, artifact, version))
    }
}

/// The artifact's own coordinates, with group/version falling back to the
/// parent block as Maven inheritance allows.
fn effective_gav(raw: &RawModel) -> Result<Gav, ResolveError> {
    let artifact_id = raw
        .artifact_id
        .clone()
        .ok_or(ResolveError::MissingArtifactId)?;

    let parent = raw.parent.as_ref();
    let group_id = raw
        .group_id
        .clone()
        .or_else(|| parent.and_then(|p| p.group_id.clone()))
        .ok_or_else(|| ResolveError::MissingGroupId(artifact_id.clone()))?;
    let version = raw
        .version
        .clone()
        .or_else(|| parent.and_then(|p| p.version.clone()))
        .ok_or_else(|| ResolveError::MissingVersion(artifact_id.clone()))?;

    Ok(Gav::new(group_id, artifact_id, version))
}

/// The parent block as coordinates, when it is complete and literal.
fn parent_ref_gav(raw: &RawModel) -> Option<Gav> {
    let parent = raw.parent.as_ref()?;
    let group = parent.group_id.as_deref()?;
    let artifact = parent.artifact_id.as_deref()?;
    let version = parent.version.as_deref()?;
    if [group, artifact, version].iter().any(|v| v.contains("${")) {
        return None;
    }
    Some(Gav::new(group, artifact, version))
}

/// Properties visible to an artifact: ancestors' (farthest first, so nearer
/// declarations win), then its own, then the `project.*`/`pom.*` built-ins.
fn gather_properties(
    effective: &Gav,
    raw: &RawModel,
    ancestors: &[&RawModel],
) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for ancestor in ancestors.iter().rev() {
        properties.extend(ancestor.properties.clone());
    }
    properties.extend(raw.properties.clone());

    for prefix in ["project", "pom"] {
        properties.insert(format!("{prefix}.groupId"), effective.group_id.clone());
        properties.insert(format!("{prefix}.artifactId"), effective.artifact_id.clone());
        properties.insert(format!("{prefix}.version"), effective.version.clone());
    }
    if let Some(parent_gav) = parent_ref_gav(raw) {
        properties.insert("project.parent.version".to_string(), parent_gav.version.clone());
        properties.insert("parent.version".to_string(), parent_gav.version);
    }

    properties
}

/// Nearest managed version for `group:artifact`, searching the artifact's own
/// `<dependencyManagement>` first, then up the parent chain.
fn managed_version(
    group: &str,
    artifact: &str,
    raw: &RawModel,
    ancestors: &[&RawModel],
    properties: &BTreeMap<String, String>,
) -> Option<String> {
    std::iter::once(raw)
        .chain(ancestors.iter().copied())
        .flat_map(|model| &model.managed_dependencies)
        .find_map(|managed| {
            let managed_group = interpolate(managed.group_id.as_deref()?, properties)?;
            let managed_artifact = interpolate(managed.artifact_id.as_deref()?, properties)?;
            if managed_group == group && managed_artifact == artifact {
                interpolate(managed.version.as_deref()?, properties)
            } else {
                None
            }
        })
}

/// Expand `${...}` references. Returns `None` when a referenced property is
/// unknown or the value still contains placeholders after a few passes
/// (self-referential chains).
fn interpolate(value: &str, properties: &BTreeMap<String, String>) -> Option<String> {
    let mut current = value.to_string();
    for _ in 0..5 {
        if !current.contains("${") {
            return Some(current);
        }
        current = substitute_pass(&current, properties)?;
    }
    if current.contains("${") { None } else { Some(current) }
}

fn substitute_pass(value: &str, properties: &BTreeMap<String, String>) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let key = &after[..end];
        out.push_str(properties.get(key)?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}

//! Maven repository layout: walking for descriptors, path ↔ GAV mapping

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use pomsweep_core::Gav;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("`{0}` is not inside the repository root")]
    OutsideRepository(PathBuf),
    #[error("`{0}` is too shallow to encode group/artifact/version")]
    PathTooShallow(PathBuf),
    #[error("`{0}` contains non-UTF-8 path components")]
    NonUtf8Path(PathBuf),
}

/// Walk the repository root and collect every `.pom` file.
///
/// The walk ignores nothing on its own (a local repository is not a source
/// tree, so gitignore-style filters are switched off) and skips unreadable
/// entries with a warning instead of aborting.
pub fn scan_repository(root: &Path) -> Vec<PathBuf> {
    let mut poms = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable repository entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_some_and(|ft| ft.is_file()) && is_pom(path) {
            poms.push(path.to_path_buf());
        }
    }

    poms.sort();
    poms
}

fn is_pom(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pom"))
}

/// Derive artifact coordinates from a descriptor's location.
///
/// Read backwards, the path relative to the repository root is
/// `file.pom / version / artifactId / group directories…`, with the group
/// directories joined by `.`.
pub fn gav_from_path(root: &Path, pom_path: &Path) -> Result<Gav, ScanError> {
    let relative = pom_path
        .strip_prefix(root)
        .map_err(|_| ScanError::OutsideRepository(pom_path.to_path_buf()))?;

    let mut components: Vec<&str> = Vec::new();
    for component in relative.components() {
        let text = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ScanError::NonUtf8Path(pom_path.to_path_buf()))?;
        components.push(text);
    }

    // file.pom, version, artifactId, then at least one group directory.
    if components.len() < 4 {
        return Err(ScanError::PathTooShallow(pom_path.to_path_buf()));
    }

    let _file = components.pop();
    let version = components.pop().unwrap_or_default();
    let artifact_id = components.pop().unwrap_or_default();
    let group_id = components.join(".");

    Ok(Gav::new(group_id, artifact_id, version))
}

/// The canonical descriptor location for a coordinate:
/// `group/dirs/artifactId/version/artifactId-version.pom`.
///
/// Layout validation compares a discovered pom against this path; a mismatch
/// means the file does not live where the repository says that artifact
/// belongs.
pub fn expected_pom_path(root: &Path, gav: &Gav) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in gav.group_id.split('.') {
        path.push(part);
    }
    path.push(&gav.artifact_id);
    path.push(&gav.version);
    path.push(format!("{}-{}.pom", gav.artifact_id, gav.version));
    path
}

//! Pomsweep Scanner — repository walking, POM parsing, and local resolution
//!
//! Everything in this crate sits in front of the graph engine: it discovers
//! `.pom` descriptors in a local repository, parses them, resolves their
//! dependency coordinates as far as the local files allow, and hands the
//! engine a map of fully analyzed artifacts. Artifacts that fail anywhere
//! along the way are marked and counted, never fatal.

pub mod artifact;
pub mod descriptor;
pub mod layout;
pub mod pipeline;
pub mod progress;
pub mod resolve;

pub use artifact::{ArtifactStatus, ScannedArtifact};
pub use descriptor::{DescriptorError, RawDependency, RawModel, RawParent, parse_pom};
pub use layout::{ScanError, expected_pom_path, gav_from_path, scan_repository};
pub use pipeline::{Analysis, analyze_and_build, analyze_repository};
pub use progress::{ConsoleProgress, NullProgress, ProgressListener};
pub use resolve::{ResolveError, Resolver};

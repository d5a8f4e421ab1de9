//! Identity types shared by the resolver and its callers.

use std::fmt;
use std::path::{Path, PathBuf};

/// Unit of breadth-first work: one profile of one module directory.
///
/// Equality is by exact field match. The same value serves as the dedup key
/// and the cycle guard during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionNode {
    module_dir: PathBuf,
    profile: String,
}

impl ResolutionNode {
    /// Creates a node for `profile` of the module in `module_dir`.
    #[must_use]
    pub fn new(module_dir: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            module_dir: module_dir.into(),
            profile: profile.into(),
        }
    }

    /// Directory of the module.
    #[must_use]
    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// Requested profile name.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

impl fmt::Display for ResolutionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module_dir.display(), self.profile)
    }
}

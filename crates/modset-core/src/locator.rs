//! Module location: turning a referenced module name into a directory.
//!
//! The traversal only requires [`ModuleLocator::locate`] to be a pure
//! function of the name for the duration of one run.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Maps module names to module directories.
pub trait ModuleLocator {
    /// Returns the directory of `module`, or `None` if it cannot be found.
    fn locate(&self, module: &str) -> Option<PathBuf>;
}

/// Resolves names against sibling directories of a workspace directory.
#[derive(Debug, Clone)]
pub struct SiblingLocator {
    workspace: PathBuf,
}

impl SiblingLocator {
    /// Creates a locator for modules living directly under `workspace`.
    #[must_use]
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// Creates a locator for the siblings of `module_dir`.
    ///
    /// A directory without a parent is treated as its own workspace.
    #[must_use]
    pub fn for_module(module_dir: &Path) -> Self {
        Self::new(module_dir.parent().unwrap_or(module_dir))
    }

    /// The workspace directory names are resolved against.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }
}

impl ModuleLocator for SiblingLocator {
    fn locate(&self, module: &str) -> Option<PathBuf> {
        let candidate = self.workspace.join(module);
        let mut components = Path::new(module).components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        (is_plain_name && candidate.is_dir()).then_some(candidate)
    }
}

/// Resolves names from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct MapLocator {
    modules: HashMap<String, PathBuf>,
}

impl MapLocator {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` at `dir`, builder style.
    #[must_use]
    pub fn with(mut self, module: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let _ = self.modules.insert(module.into(), dir.into());
        self
    }
}

impl ModuleLocator for MapLocator {
    fn locate(&self, module: &str) -> Option<PathBuf> {
        self.modules.get(module).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_locator_finds_existing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("ext")).expect("mkdir");
        let locator = SiblingLocator::for_module(&dir.path().join("cur"));
        assert_eq!(locator.workspace(), dir.path());
        assert_eq!(locator.locate("ext"), Some(dir.path().join("ext")));
    }

    #[test]
    fn sibling_locator_misses_absent_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(SiblingLocator::new(dir.path()).locate("ext"), None);
    }

    #[test]
    fn sibling_locator_rejects_path_like_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("a").join("b")).expect("mkdir");
        let locator = SiblingLocator::new(dir.path());
        assert_eq!(locator.locate("a/b"), None);
        assert_eq!(locator.locate(".."), None);
    }

    #[test]
    fn map_locator_looks_up_table() {
        let locator = MapLocator::new().with("ext", "/w/ext");
        assert_eq!(locator.locate("ext"), Some(PathBuf::from("/w/ext")));
        assert_eq!(locator.locate("q"), None);
    }
}

//! Entry point for collecting a root module's full-build installs.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use modset_common::config::CollectorConfig;
use modset_common::error::Result;

use crate::locator::{ModuleLocator, SiblingLocator};
use crate::source::{DescriptorSource, FsDescriptorSource};
use crate::traversal::{InstallSet, Traversal};

/// Collects build files and packages for one root module.
///
/// The first successful [`Collector::get`] is cached; later calls return the
/// same set. A failed run is not cached. The cache makes the collector
/// `!Sync`, so one instance is never shared across threads.
pub struct Collector {
    root: PathBuf,
    source: Box<dyn DescriptorSource>,
    locator: Box<dyn ModuleLocator>,
    config: CollectorConfig,
    cached: OnceCell<InstallSet>,
}

impl Collector {
    /// Creates a collector with explicit collaborators.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        source: Box<dyn DescriptorSource>,
        locator: Box<dyn ModuleLocator>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            root: root.into(),
            source,
            locator,
            config,
            cached: OnceCell::new(),
        }
    }

    /// Creates a collector reading descriptors from disk, locating
    /// referenced modules among the root's sibling directories.
    #[must_use]
    pub fn from_dir(root: impl Into<PathBuf>, config: CollectorConfig) -> Self {
        let root = root.into();
        let source = FsDescriptorSource::new(config.descriptor_file.as_str());
        let locator = SiblingLocator::for_module(&root);
        Self::new(root, Box::new(source), Box::new(locator), config)
    }

    /// Root module directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Runs the collection once and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the root has no
    /// descriptor, any descriptor is malformed, or a module reference
    /// cannot be located.
    pub fn get(&self) -> Result<&InstallSet> {
        if let Some(set) = self.cached.get() {
            return Ok(set);
        }
        self.config.validate()?;
        let set = Traversal::new(self.source.as_ref(), self.locator.as_ref(), &self.config)
            .run(&self.root)?;
        Ok(self.cached.get_or_init(|| set))
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("collected", &self.cached.get().is_some())
            .finish_non_exhaustive()
    }
}

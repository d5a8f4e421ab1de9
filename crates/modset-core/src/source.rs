//! Loading descriptors for module directories.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use modset_common::constants::DESCRIPTOR_FILE;
use modset_common::error::{ModsetError, Result};

use crate::descriptor::ModuleDescriptor;

/// Provides the descriptor of a module directory.
pub trait DescriptorSource {
    /// Loads the descriptor of the module in `module_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ModsetError::DescriptorNotFound`] if the directory has no
    /// descriptor, or a parse error if it is malformed.
    fn load(&self, module_dir: &Path) -> Result<ModuleDescriptor>;
}

/// Derives the module name from its directory.
///
/// # Errors
///
/// Returns [`ModsetError::Config`] if the path has no final component.
pub fn module_name(module_dir: &Path) -> Result<&str> {
    module_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ModsetError::Config {
            message: format!("cannot derive a module name from {}", module_dir.display()),
        })
}

/// Reads `<module_dir>/<descriptor_file>` from disk.
#[derive(Debug, Clone)]
pub struct FsDescriptorSource {
    descriptor_file: String,
}

impl FsDescriptorSource {
    /// Creates a source reading descriptors named `descriptor_file`.
    #[must_use]
    pub fn new(descriptor_file: impl Into<String>) -> Self {
        Self {
            descriptor_file: descriptor_file.into(),
        }
    }

    /// Path of the descriptor for `module_dir`.
    #[must_use]
    pub fn descriptor_path(&self, module_dir: &Path) -> PathBuf {
        module_dir.join(&self.descriptor_file)
    }
}

impl Default for FsDescriptorSource {
    fn default() -> Self {
        Self::new(DESCRIPTOR_FILE)
    }
}

impl DescriptorSource for FsDescriptorSource {
    fn load(&self, module_dir: &Path) -> Result<ModuleDescriptor> {
        let path = self.descriptor_path(module_dir);
        tracing::debug!(path = %path.display(), "reading descriptor");

        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModsetError::DescriptorNotFound { path: path.clone() },
            _ => ModsetError::Io {
                path: path.clone(),
                source: e,
            },
        })?;
        ModuleDescriptor::from_yaml(module_name(module_dir)?, &path, &text)
    }
}

/// Descriptors held in memory, keyed by module directory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    descriptors: HashMap<PathBuf, ModuleDescriptor>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` as the descriptor of `module_dir` and stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse.
    pub fn insert_yaml(&mut self, module_dir: impl Into<PathBuf>, text: &str) -> Result<()> {
        let module_dir = module_dir.into();
        let descriptor =
            ModuleDescriptor::from_yaml(module_name(&module_dir)?, &module_dir, text)?;
        let _ = self.descriptors.insert(module_dir, descriptor);
        Ok(())
    }
}

impl DescriptorSource for MemorySource {
    fn load(&self, module_dir: &Path) -> Result<ModuleDescriptor> {
        self.descriptors
            .get(module_dir)
            .cloned()
            .ok_or_else(|| ModsetError::DescriptorNotFound {
                path: module_dir.to_path_buf(),
            })
    }
}

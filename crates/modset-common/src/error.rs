//! Unified error type for the modset workspace.
//!
//! Every failure is fatal to the run that raised it: a defect in the module
//! graph is surfaced, never skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ModsetError {
    /// A module directory has no loadable descriptor.
    #[error("module descriptor not found: {}", path.display())]
    DescriptorNotFound {
        /// Descriptor path that was probed.
        path: PathBuf,
    },

    /// A module reference names a module the locator cannot find.
    #[error("module \"{module}\" references unknown module \"{reference}\"")]
    UnresolvedModuleReference {
        /// Module whose install list holds the reference.
        module: String,
        /// Name of the module that could not be located.
        reference: String,
    },

    /// An install-list entry violates the entry grammar.
    #[error("malformed install entry in module \"{module}\": {entry:?}")]
    MalformedEntry {
        /// Module owning the entry.
        module: String,
        /// Offending raw entry text.
        entry: String,
    },

    /// A descriptor document does not have the expected shape.
    #[error("malformed descriptor {}: {message}", path.display())]
    MalformedDescriptor {
        /// Path of the descriptor.
        path: PathBuf,
        /// Description of the defect.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ModsetError>;

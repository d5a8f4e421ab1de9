//! Workspace-wide constants and defaults.

/// File name of the descriptor expected in every module directory.
pub const DESCRIPTOR_FILE: &str = "module.yaml";

/// Profile resolved for the root module and for module references that
/// do not name a profile.
pub const FULL_BUILD_PROFILE: &str = "full-build";

/// Separator between the base and augment halves of a composite section key.
pub const AUGMENT_SEPARATOR: char = '>';

/// Separator placed between a module name and a file name in build-file
/// references.
pub const BUILD_FILE_SEPARATOR: char = '\\';

/// Install-entry prefix marking a published package reference.
pub const PACKAGE_PREFIX: &str = "nuget";

/// Install-entry prefix marking a reference to another module.
pub const MODULE_PREFIX: &str = "module";

//! # modset-core
//!
//! Resolves the ordered build files and packages a root module needs for a
//! full build.
//!
//! Handles:
//! - **Descriptor**: the parsed `module.yaml` of one module.
//! - **Entry**: classification of install-list strings.
//! - **Profile**: per-profile section resolution with composite keys.
//! - **Source / Locator**: loading descriptors and finding referenced modules.
//! - **Traversal**: the breadth-first walk with ordering and dedup guarantees.
//! - **Collector**: a memoizing facade over a single run.

pub mod collector;
pub mod descriptor;
pub mod entry;
pub mod locator;
pub mod profile;
pub mod source;
pub mod traversal;

pub use collector::Collector;
pub use traversal::InstallSet;

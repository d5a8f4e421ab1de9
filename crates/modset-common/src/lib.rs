//! # modset-common
//!
//! Shared error definitions, configuration model, constants, and identity
//! types used across the modset workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

//! Breadth-first walk over `(module, profile)` resolution nodes.
//!
//! Module references are appended to the back of a FIFO queue, so every
//! entry of a node is emitted before any entry of the nodes it references,
//! and earlier-discovered nodes expand before later ones. A visited set
//! bounds each node to one expansion, which also breaks reference cycles.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use modset_common::config::CollectorConfig;
use modset_common::error::{ModsetError, Result};
use modset_common::types::ResolutionNode;
use serde::Serialize;

use crate::descriptor::build_file;
use crate::entry::InstallEntry;
use crate::locator::ModuleLocator;
use crate::profile;
use crate::source::DescriptorSource;

/// Ordered, duplicate-free result of one collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallSet {
    build_files: Vec<String>,
    packages: Vec<String>,
}

impl InstallSet {
    /// Module-qualified build files, `<module>\<file>`, in discovery order.
    #[must_use]
    pub fn build_files(&self) -> &[String] {
        &self.build_files
    }

    /// Package names in discovery order.
    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.packages
    }
}

/// Append-only list that keeps the first occurrence of each value.
#[derive(Debug, Default)]
struct UniqueList {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl UniqueList {
    fn push(&mut self, value: String) {
        if self.seen.contains(&value) {
            tracing::trace!(value = %value, "already collected");
            return;
        }
        let _ = self.seen.insert(value.clone());
        self.items.push(value);
    }
}

/// One traversal over a module graph.
pub struct Traversal<'a> {
    source: &'a dyn DescriptorSource,
    locator: &'a dyn ModuleLocator,
    config: &'a CollectorConfig,
}

impl<'a> Traversal<'a> {
    /// Creates a traversal reading descriptors from `source` and locating
    /// referenced modules through `locator`.
    #[must_use]
    pub fn new(
        source: &'a dyn DescriptorSource,
        locator: &'a dyn ModuleLocator,
        config: &'a CollectorConfig,
    ) -> Self {
        Self {
            source,
            locator,
            config,
        }
    }

    /// Walks the graph rooted at `root_dir` and returns what it installs.
    ///
    /// # Errors
    ///
    /// Fails on the first missing descriptor, malformed descriptor, or
    /// module reference the locator cannot resolve. No partial result is
    /// returned.
    pub fn run(&self, root_dir: &Path) -> Result<InstallSet> {
        let root = ResolutionNode::new(root_dir, self.config.root_profile.as_str());
        tracing::info!(root = %root, "collecting installs");

        let mut queue = VecDeque::from([root.clone()]);
        let mut visited: HashSet<ResolutionNode> = HashSet::new();
        let mut build_files = UniqueList::default();
        let mut packages = UniqueList::default();

        while let Some(node) = queue.pop_front() {
            if !visited.insert(node.clone()) {
                tracing::trace!(node = %node, "already visited");
                continue;
            }

            let descriptor = self.source.load(node.module_dir())?;
            let body = if node == root || self.config.augment_referenced_profiles {
                profile::resolve(&descriptor, node.profile())
            } else {
                profile::resolve_plain(&descriptor, node.profile())
            };
            tracing::debug!(
                node = %node,
                entries = body.install.len(),
                "expanding node"
            );

            let module = descriptor.module();
            for item in &body.install {
                match item {
                    InstallEntry::LocalFile { name } => build_files.push(build_file(module, name)),
                    InstallEntry::Package { name } => packages.push(name.clone()),
                    InstallEntry::ModuleRef {
                        module: reference,
                        profile: pinned,
                    } => {
                        let dir = self.locator.locate(reference).ok_or_else(|| {
                            ModsetError::UnresolvedModuleReference {
                                module: module.to_owned(),
                                reference: reference.clone(),
                            }
                        })?;
                        let profile = pinned
                            .as_deref()
                            .unwrap_or(self.config.default_profile.as_str());
                        let child = ResolutionNode::new(dir, profile);
                        tracing::debug!(from = %node, to = %child, "enqueueing reference");
                        queue.push_back(child);
                    }
                }
            }
        }

        tracing::info!(
            nodes = visited.len(),
            build_files = build_files.items.len(),
            packages = packages.items.len(),
            "collection finished"
        );
        Ok(InstallSet {
            build_files: build_files.items,
            packages: packages.items,
        })
    }
}

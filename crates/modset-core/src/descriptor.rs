//! In-memory model of one module's `module.yaml`.
//!
//! Section keys are parsed into [`SectionKey`] and install entries are
//! classified once, when the document is loaded. Lookups never re-parse
//! strings.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use modset_common::constants::{AUGMENT_SEPARATOR, BUILD_FILE_SEPARATOR};
use modset_common::error::{ModsetError, Result};
use serde::{Deserialize, Serialize};

use crate::entry::{self, InstallEntry};
use crate::profile;

/// Key of one descriptor section: `profile` or `profile > augment`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    base: String,
    augment: Option<String>,
}

impl SectionKey {
    /// Creates a plain key naming a single profile.
    #[must_use]
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            augment: None,
        }
    }

    /// Creates a composite key: resolving `base` also pulls in `augment`.
    #[must_use]
    pub fn composite(base: impl Into<String>, augment: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            augment: Some(augment.into()),
        }
    }

    /// Parses a raw key as written in the descriptor.
    ///
    /// Returns `None` if either half of a composite key is empty or if the
    /// key holds more than one separator.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.split_once(AUGMENT_SEPARATOR) {
            None => {
                let base = raw.trim();
                (!base.is_empty()).then(|| Self::plain(base))
            }
            Some((base, augment)) => {
                let (base, augment) = (base.trim(), augment.trim());
                if base.is_empty() || augment.is_empty() || augment.contains(AUGMENT_SEPARATOR) {
                    return None;
                }
                Some(Self::composite(base, augment))
            }
        }
    }

    /// Profile this key answers to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Profile pulled in alongside the base, if composite.
    #[must_use]
    pub fn augment(&self) -> Option<&str> {
        self.augment.as_deref()
    }

    /// Whether this is a plain key for exactly `profile`.
    #[must_use]
    pub fn is_plain(&self, profile: &str) -> bool {
        self.augment.is_none() && self.base == profile
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.augment {
            Some(augment) => write!(f, "{} {AUGMENT_SEPARATOR} {augment}", self.base),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Content of one section, or the concatenation of several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionBody {
    /// Module names this section depends on.
    pub deps: Vec<String>,
    /// Classified install entries.
    pub install: Vec<InstallEntry>,
}

impl SectionBody {
    /// Appends another body's lists after this one's.
    pub fn extend_from(&mut self, other: &Self) {
        self.deps.extend(other.deps.iter().cloned());
        self.install.extend(other.install.iter().cloned());
    }

    /// Whether both lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty() && self.install.is_empty()
    }
}

/// One keyed section of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Parsed key.
    pub key: SectionKey,
    /// Section content.
    pub body: SectionBody,
}

/// Wire shape of a section; absent or null lists are empty.
///
/// Items stay untyped so that `- 2` or `- 1.0` read as names.
#[derive(Debug, Default, Deserialize)]
struct RawSection {
    #[serde(default)]
    deps: Option<Vec<serde_yaml::Value>>,
    #[serde(default)]
    install: Option<Vec<serde_yaml::Value>>,
}

/// String form of a scalar list item. A null item reads as blank.
fn scalar_text(item: serde_yaml::Value) -> std::result::Result<String, serde_yaml::Value> {
    match item {
        serde_yaml::Value::String(text) => Ok(text),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        other => Err(other),
    }
}

/// Parsed descriptor of a single module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    module: String,
    sections: Vec<Section>,
}

impl ModuleDescriptor {
    /// Builds a descriptor from already-parsed sections.
    ///
    /// # Errors
    ///
    /// Returns [`ModsetError::MalformedDescriptor`] if two sections share a key.
    pub fn new(module: impl Into<String>, sections: Vec<Section>) -> Result<Self> {
        let module = module.into();
        let mut keys = HashSet::new();
        for section in &sections {
            if !keys.insert(&section.key) {
                return Err(ModsetError::MalformedDescriptor {
                    path: module.clone().into(),
                    message: format!("duplicate section \"{}\"", section.key),
                });
            }
        }
        Ok(Self { module, sections })
    }

    /// Parses the YAML text of `module`'s descriptor.
    ///
    /// `origin` is only used in error reports. An empty document yields a
    /// descriptor with no sections.
    ///
    /// # Errors
    ///
    /// Returns [`ModsetError::MalformedDescriptor`] if the document is not a
    /// mapping of sections, and [`ModsetError::MalformedEntry`] if an
    /// install entry cannot be classified.
    pub fn from_yaml(module: &str, origin: &Path, text: &str) -> Result<Self> {
        let malformed = |message: String| ModsetError::MalformedDescriptor {
            path: origin.to_path_buf(),
            message,
        };

        let document: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| malformed(e.to_string()))?;
        let mapping = match document {
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            serde_yaml::Value::Mapping(mapping) => mapping,
            _ => return Err(malformed("top level must be a mapping of sections".into())),
        };

        let mut sections = Vec::with_capacity(mapping.len());
        for (raw_key, raw_body) in mapping {
            let raw_key = match raw_key {
                serde_yaml::Value::String(raw_key) => raw_key,
                other => {
                    return Err(malformed(format!("section key {other:?} is not a string")));
                }
            };
            let key = SectionKey::parse(&raw_key)
                .ok_or_else(|| malformed(format!("invalid section key \"{raw_key}\"")))?;
            let raw: Option<RawSection> = serde_yaml::from_value(raw_body)
                .map_err(|e| malformed(format!("section \"{raw_key}\": {e}")))?;
            let raw = raw.unwrap_or_default();

            let list = |items: Option<Vec<serde_yaml::Value>>, field: &str| {
                items
                    .unwrap_or_default()
                    .into_iter()
                    .map(|item| {
                        scalar_text(item).map_err(|other| {
                            malformed(format!(
                                "section \"{raw_key}\": {field} item {other:?} is not a scalar"
                            ))
                        })
                    })
                    .collect::<Result<Vec<String>>>()
            };
            let deps = list(raw.deps, "deps")?;
            let install = list(raw.install, "install")?
                .iter()
                .map(|item| entry::classify(module, item))
                .collect::<Result<Vec<_>>>()?;
            sections.push(Section {
                key,
                body: SectionBody { deps, install },
            });
        }

        Self::new(module, sections).map_err(|e| match e {
            ModsetError::MalformedDescriptor { message, .. } => malformed(message),
            other => other,
        })
    }

    /// Name of the module this descriptor belongs to.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The plain section named exactly `profile`, if declared.
    #[must_use]
    pub fn plain_section(&self, profile: &str) -> Option<&SectionBody> {
        self.sections
            .iter()
            .find(|s| s.key.is_plain(profile))
            .map(|s| &s.body)
    }

    /// Distinct profile names mentioned by any key, bases and augments, in
    /// order of first appearance.
    #[must_use]
    pub fn profiles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .flat_map(|s| std::iter::once(s.key.base()).chain(s.key.augment()))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Summarises what `profile` of this module installs, without following
    /// module references.
    #[must_use]
    pub fn install_for(&self, profile: &str) -> ModuleInstall {
        ModuleInstall::from_body(&self.module, &profile::resolve(self, profile))
    }
}

/// Per-module install summary for one resolved profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleInstall {
    /// Module-qualified build files, `<module>\<file>`.
    pub build_files: Vec<String>,
    /// Names of referenced modules.
    pub external_modules: Vec<String>,
    /// Package names.
    pub packages: Vec<String>,
}

impl ModuleInstall {
    /// Splits a resolved body into the three lists, dropping repeats.
    #[must_use]
    pub fn from_body(module: &str, body: &SectionBody) -> Self {
        let mut install = Self::default();
        let mut seen = HashSet::new();
        for item in &body.install {
            let (list, value) = match item {
                InstallEntry::LocalFile { name } => {
                    (&mut install.build_files, build_file(module, name))
                }
                InstallEntry::ModuleRef {
                    module: reference, ..
                } => (&mut install.external_modules, reference.clone()),
                InstallEntry::Package { name } => (&mut install.packages, name.clone()),
            };
            if seen.insert((std::mem::discriminant(item), value.clone())) {
                list.push(value);
            }
        }
        install
    }
}

/// Formats a module-qualified build-file reference.
#[must_use]
pub fn build_file(module: &str, file: &str) -> String {
    format!("{module}{BUILD_FILE_SEPARATOR}{file}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(module: &str, text: &str) -> ModuleDescriptor {
        ModuleDescriptor::from_yaml(module, &PathBuf::from("module.yaml"), text)
            .expect("should parse")
    }

    #[test]
    fn plain_key_has_no_augment() {
        let key = SectionKey::parse("full-build").expect("key");
        assert_eq!(key.base(), "full-build");
        assert_eq!(key.augment(), None);
    }

    #[test]
    fn composite_key_is_trimmed() {
        let key = SectionKey::parse("full-build   >client ").expect("key");
        assert_eq!(key, SectionKey::composite("full-build", "client"));
        assert_eq!(key.to_string(), "full-build > client");
    }

    #[test]
    fn invalid_keys_are_rejected() {
        assert_eq!(SectionKey::parse("> client"), None);
        assert_eq!(SectionKey::parse("full-build >"), None);
        assert_eq!(SectionKey::parse("a > b > c"), None);
        assert_eq!(SectionKey::parse("  "), None);
    }

    #[test]
    fn sections_keep_declaration_order() {
        let d = parse(
            "cur",
            "
full-build > client:
    deps:
        - ext
    install:
        - current
client:
    install:
        - current.client
sdk:
",
        );
        let keys: Vec<String> = d.sections().iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["full-build > client", "client", "sdk"]);
        assert_eq!(d.sections()[0].body.deps, vec!["ext"]);
        assert!(d.sections()[2].body.is_empty());
    }

    #[test]
    fn null_install_list_is_empty() {
        let d = parse("q", "full-build:\n    install:\n");
        assert_eq!(d.plain_section("full-build"), Some(&SectionBody::default()));
    }

    #[test]
    fn empty_document_has_no_sections() {
        assert!(parse("q", "").sections().is_empty());
    }

    #[test]
    fn install_entries_are_classified_on_load() {
        let d = parse(
            "cur",
            "full-build:\n    install:\n        - current\n        - module ext/client\n        - nuget Pkg\n",
        );
        let body = d.plain_section("full-build").expect("section");
        assert_eq!(
            body.install,
            vec![
                InstallEntry::LocalFile {
                    name: "current".into()
                },
                InstallEntry::ModuleRef {
                    module: "ext".into(),
                    profile: Some("client".into())
                },
                InstallEntry::Package { name: "Pkg".into() },
            ]
        );
    }

    #[test]
    fn blank_entry_fails_with_owning_module() {
        let err = ModuleDescriptor::from_yaml(
            "cur",
            Path::new("cur/module.yaml"),
            "full-build:\n    install:\n        - \"\"\n",
        )
        .unwrap_err();
        assert!(
            matches!(err, ModsetError::MalformedEntry { ref module, .. } if module == "cur"),
            "got: {err}"
        );
    }

    #[test]
    fn numeric_and_boolean_items_read_as_names() {
        let d = parse(
            "q",
            "full-build:\n    deps:\n        - 7\n    install:\n        - 2\n        - 1.0\n        - true\n",
        );
        let body = d.plain_section("full-build").expect("section");
        assert_eq!(body.deps, vec!["7"]);
        let names: Vec<String> = body.install.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["2", "1.0", "true"]);
    }

    #[test]
    fn null_install_item_is_a_blank_entry() {
        let err = ModuleDescriptor::from_yaml(
            "cur",
            Path::new("cur/module.yaml"),
            "full-build:\n    install:\n        - ~\n",
        )
        .unwrap_err();
        assert!(matches!(err, ModsetError::MalformedEntry { .. }), "got: {err}");
    }

    #[test]
    fn nested_install_item_is_malformed() {
        let err = ModuleDescriptor::from_yaml(
            "cur",
            Path::new("cur/module.yaml"),
            "full-build:\n    install:\n        - [a, b]\n",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("not a scalar"), "got: {msg}");
    }

    #[test]
    fn sequence_document_is_malformed() {
        let err = ModuleDescriptor::from_yaml("cur", Path::new("cur/module.yaml"), "- a\n- b\n")
            .unwrap_err();
        assert!(matches!(err, ModsetError::MalformedDescriptor { .. }));
    }

    #[test]
    fn equivalent_keys_collide() {
        let err = ModuleDescriptor::from_yaml(
            "cur",
            Path::new("cur/module.yaml"),
            "a > b:\na>b:\n",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("duplicate section"), "got: {msg}");
        assert!(msg.contains("cur/module.yaml"), "got: {msg}");
    }

    #[test]
    fn profiles_lists_bases_and_augments_once() {
        let d = parse("cur", "full-build > client:\nclient:\nsdk:\n");
        assert_eq!(d.profiles(), vec!["full-build", "client", "sdk"]);
    }

    #[test]
    fn install_for_reports_external_modules() {
        let d = parse(
            "cur",
            "
full-build:
    deps:
        - ext
    install:
        - current
        - module ext
",
        );
        let install = d.install_for("full-build");
        assert_eq!(install.external_modules, vec!["ext"]);
        assert_eq!(install.build_files, vec![r"cur\current"]);
    }

    #[test]
    fn install_for_reports_packages() {
        let d = parse(
            "cur",
            "
full-build:
    install:
        - current
        - nuget Newtonsoft.Json
        - nuget Newtonsoft.Json
",
        );
        assert_eq!(d.install_for("full-build").packages, vec!["Newtonsoft.Json"]);
    }
}

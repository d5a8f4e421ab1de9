//! Per-profile section resolution.
//!
//! A composite key `base > augment` declares that resolving `base` also
//! pulls in the plain `augment` section. Requesting `augment` directly never
//! triggers the composite section, because matching is on the base only.

use crate::descriptor::{ModuleDescriptor, SectionBody};

/// Resolves the content `profile` contributes, applying composition.
///
/// Every composite section whose base is `profile` contributes first, in
/// declaration order, each followed by the plain section named after its
/// augment. The plain section named `profile` comes last. Composition is one
/// level deep. No match yields an empty body.
#[must_use]
pub fn resolve(descriptor: &ModuleDescriptor, profile: &str) -> SectionBody {
    let mut body = SectionBody::default();
    for section in descriptor.sections() {
        let Some(augment) = section.key.augment() else {
            continue;
        };
        if section.key.base() != profile {
            continue;
        }
        body.extend_from(&section.body);
        match descriptor.plain_section(augment) {
            Some(extra) => body.extend_from(extra),
            None => tracing::debug!(
                module = descriptor.module(),
                profile,
                augment,
                "augment section not declared"
            ),
        }
    }
    if let Some(plain) = descriptor.plain_section(profile) {
        body.extend_from(plain);
    }
    body
}

/// Resolves only the plain section named exactly `profile`.
#[must_use]
pub fn resolve_plain(descriptor: &ModuleDescriptor, profile: &str) -> SectionBody {
    descriptor
        .plain_section(profile)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::entry::InstallEntry;

    fn parse(text: &str) -> ModuleDescriptor {
        ModuleDescriptor::from_yaml("cur", Path::new("cur/module.yaml"), text).expect("parse")
    }

    fn files(body: &SectionBody) -> Vec<String> {
        body.install.iter().map(ToString::to_string).collect()
    }

    const COMPOSED: &str = "
full-build > client:
    deps:
        - ext
    install:
        - current
        - module ext
client:
    install:
        - current.client
";

    #[test]
    fn base_pulls_in_augment_after_composite_body() {
        let body = resolve(&parse(COMPOSED), "full-build");
        assert_eq!(files(&body), vec!["current", "module ext", "current.client"]);
        assert_eq!(body.deps, vec!["ext"]);
    }

    #[test]
    fn augment_requested_directly_yields_plain_only() {
        let body = resolve(&parse(COMPOSED), "client");
        assert_eq!(files(&body), vec!["current.client"]);
    }

    #[test]
    fn plain_resolution_ignores_composite_keys() {
        let body = resolve_plain(&parse(COMPOSED), "full-build");
        assert!(body.is_empty());
    }

    #[test]
    fn unknown_profile_is_empty_not_an_error() {
        assert_eq!(resolve(&parse(COMPOSED), "sdk"), SectionBody::default());
    }

    #[test]
    fn plain_base_declared_first_still_comes_last() {
        let d = parse(
            "
full-build:
    install:
        - a
full-build > client:
    install:
        - b
client:
    install:
        - c
",
        );
        assert_eq!(files(&resolve(&d, "full-build")), vec!["b", "c", "a"]);
    }

    #[test]
    fn plain_base_declared_last_comes_last() {
        let d = parse(
            "
full-build > client:
    install:
        - b
client:
    install:
        - c
full-build:
    install:
        - a
",
        );
        assert_eq!(files(&resolve(&d, "full-build")), vec!["b", "c", "a"]);
    }

    #[test]
    fn several_composites_keep_declaration_order() {
        let d = parse(
            "
full-build:
    install:
        - a
full-build > tests:
    install:
        - t
full-build > client:
    install:
        - b
client:
    install:
        - c
tests:
    install:
        - u
",
        );
        assert_eq!(
            files(&resolve(&d, "full-build")),
            vec!["t", "u", "b", "c", "a"]
        );
    }

    #[test]
    fn missing_augment_section_contributes_nothing() {
        let d = parse("full-build > tests:\n    install:\n        - a\n");
        assert_eq!(
            resolve(&d, "full-build").install,
            vec![InstallEntry::LocalFile { name: "a".into() }]
        );
    }

    #[test]
    fn augment_is_not_augmented_again() {
        let d = parse(
            "
full-build > client:
    install:
        - a
client > sdk:
    install:
        - b
client:
    install:
        - c
sdk:
    install:
        - d
",
        );
        assert_eq!(files(&resolve(&d, "full-build")), vec!["a", "c"]);
        assert_eq!(files(&resolve(&d, "client")), vec!["b", "d", "c"]);
    }
}

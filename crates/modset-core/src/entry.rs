//! Classification of raw install-list strings, built on `nom`.
//!
//! Grammar, applied to the trimmed entry, first match wins:
//!
//! ```text
//! nuget <name>              -> Package
//! module <name>             -> ModuleRef (default profile)
//! module <name>/<profile>   -> ModuleRef
//! anything else             -> LocalFile
//! ```

use std::fmt;

use modset_common::constants::{MODULE_PREFIX, PACKAGE_PREFIX};
use modset_common::error::{ModsetError, Result};
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space1},
    combinator::{all_consuming, opt, rest},
    sequence::preceded,
};
use serde::Serialize;

/// One classified install-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallEntry {
    /// A file inside the owning module.
    LocalFile {
        /// File name as written.
        name: String,
    },
    /// A reference to another module, optionally pinned to a profile.
    ModuleRef {
        /// Referenced module name.
        module: String,
        /// Requested profile; `None` means the default profile.
        profile: Option<String>,
    },
    /// An externally published package.
    Package {
        /// Package name.
        name: String,
    },
}

impl fmt::Display for InstallEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile { name } => write!(f, "{name}"),
            Self::ModuleRef {
                module,
                profile: None,
            } => write!(f, "{MODULE_PREFIX} {module}"),
            Self::ModuleRef {
                module,
                profile: Some(profile),
            } => write!(f, "{MODULE_PREFIX} {module}/{profile}"),
            Self::Package { name } => write!(f, "{PACKAGE_PREFIX} {name}"),
        }
    }
}

/// Reserved keyword followed by at least one space; yields the remainder.
fn reserved<'a>(
    keyword: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    preceded((tag(keyword), space1), rest)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '/').parse(input)
}

/// `<name>` or `<name>/<profile>`, nothing trailing.
fn module_target(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming((word, opt(preceded(char('/'), word)))).parse(input)
}

fn package_name(input: &str) -> IResult<&str, &str> {
    all_consuming(take_while1(|c: char| !c.is_whitespace())).parse(input)
}

/// Classifies one raw install-list entry owned by `module`.
///
/// # Errors
///
/// Returns [`ModsetError::MalformedEntry`] if the entry is blank, or if a
/// reserved prefix is followed by an unusable name or profile.
pub fn classify(module: &str, raw: &str) -> Result<InstallEntry> {
    let entry = raw.trim();
    let malformed = || ModsetError::MalformedEntry {
        module: module.to_owned(),
        entry: raw.to_owned(),
    };

    if entry.is_empty() {
        return Err(malformed());
    }

    if let Ok((_, body)) = reserved(PACKAGE_PREFIX).parse(entry) {
        let (_, name) = package_name(body).map_err(|_| malformed())?;
        return Ok(InstallEntry::Package { name: name.into() });
    }

    if let Ok((_, body)) = reserved(MODULE_PREFIX).parse(entry) {
        let (_, (name, profile)) = module_target(body).map_err(|_| malformed())?;
        return Ok(InstallEntry::ModuleRef {
            module: name.into(),
            profile: profile.map(str::to_owned),
        });
    }

    Ok(InstallEntry::LocalFile { name: entry.into() })
}

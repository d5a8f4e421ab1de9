//! CLI command definitions and dispatch.

pub mod collect;
pub mod profiles;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use modset_common::config::CollectorConfig;

/// modset — full-build install collection for module trees.
#[derive(Parser, Debug)]
#[command(name = "modset", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with collector settings.
    #[arg(long, global = true, env = "MODSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Descriptor file name inside each module directory.
    #[arg(long, global = true)]
    pub descriptor_file: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect build files and packages for a root module.
    Collect(collect::CollectArgs),
    /// Show one module's resolved section without following references.
    Show(show::ShowArgs),
    /// List the profiles a module declares.
    Profiles(profiles::ProfilesArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.descriptor_file)?;
    match cli.command {
        Command::Collect(args) => collect::execute(args, config),
        Command::Show(args) => show::execute(&args, &config),
        Command::Profiles(args) => profiles::execute(&args, &config),
    }
}

/// Reads the configuration file, if any, then applies flag overrides.
fn load_config(
    path: Option<&Path>,
    descriptor_file: Option<String>,
) -> anyhow::Result<CollectorConfig> {
    let mut config = match path {
        Some(path) => CollectorConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => CollectorConfig::default(),
    };
    if let Some(name) = descriptor_file {
        config.descriptor_file = name;
    }
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Canonicalizes a module directory argument so its name is derivable.
fn module_dir(dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(dir).with_context(|| format!("module directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("modset.yaml");
        std::fs::write(&path, "descriptor_file: deps.yaml\nroot_profile: sdk\n").expect("write");

        let config = load_config(Some(&path), Some("module.yml".into())).expect("config");
        assert_eq!(config.descriptor_file, "module.yml");
        assert_eq!(config.root_profile, "sdk");
    }

    #[test]
    fn empty_descriptor_flag_is_rejected() {
        assert!(load_config(None, Some(String::new())).is_err());
    }

    #[test]
    fn dot_resolves_to_named_directory() {
        let dir = module_dir(Path::new(".")).expect("canonicalize");
        assert!(dir.file_name().is_some());
    }

    #[test]
    fn cli_parses_collect_flags() {
        let cli = Cli::try_parse_from([
            "modset",
            "collect",
            "cur",
            "--profile",
            "sdk",
            "--format",
            "json",
        ])
        .expect("parse");
        match cli.command {
            Command::Collect(args) => {
                assert_eq!(args.dir, PathBuf::from("cur"));
                assert_eq!(args.profile.as_deref(), Some("sdk"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

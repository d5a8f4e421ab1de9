//! `modset collect` — Collect build files and packages for a root module.

use std::path::PathBuf;

use clap::Args;
use modset_common::config::CollectorConfig;
use modset_core::Collector;

use crate::output::{self, OutputFormat};

/// Arguments for the `collect` command.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Root module directory.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Profile resolved for the root module.
    #[arg(long)]
    pub profile: Option<String>,

    /// Apply composite sections to referenced modules too.
    #[arg(long)]
    pub augment_referenced: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Executes the `collect` command.
///
/// # Errors
///
/// Returns an error if the root cannot be found or the module graph is
/// defective.
pub fn execute(args: CollectArgs, mut config: CollectorConfig) -> anyhow::Result<()> {
    if let Some(profile) = args.profile {
        config.root_profile = profile;
    }
    config.augment_referenced_profiles |= args.augment_referenced;

    let root = super::module_dir(&args.dir)?;
    let collector = Collector::from_dir(root, config);
    tracing::debug!(
        root = %collector.root().display(),
        config = ?collector.config(),
        "collecting"
    );
    let set = collector.get()?;

    match args.format {
        OutputFormat::Json => println!("{}", output::render_json(set)?),
        OutputFormat::Text => {
            print!("{}", output::render_list("Build files", set.build_files()));
            print!("{}", output::render_list("Packages", set.packages()));
        }
    }
    Ok(())
}

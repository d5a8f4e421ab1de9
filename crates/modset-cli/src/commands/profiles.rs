//! `modset profiles` — List the profiles a module declares.

use std::path::PathBuf;

use clap::Args;
use modset_common::config::CollectorConfig;
use modset_core::source::{DescriptorSource, FsDescriptorSource};

use crate::output;

/// Arguments for the `profiles` command.
#[derive(Args, Debug)]
pub struct ProfilesArgs {
    /// Module directory.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Executes the `profiles` command.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be loaded.
pub fn execute(args: &ProfilesArgs, config: &CollectorConfig) -> anyhow::Result<()> {
    let dir = super::module_dir(&args.dir)?;
    let descriptor = FsDescriptorSource::new(config.descriptor_file.as_str()).load(&dir)?;

    let sections: Vec<String> = descriptor
        .sections()
        .iter()
        .map(|s| s.key.to_string())
        .collect();
    print!("{}", output::render_list("Profiles", &descriptor.profiles()));
    print!("{}", output::render_list("Sections", &sections));
    Ok(())
}

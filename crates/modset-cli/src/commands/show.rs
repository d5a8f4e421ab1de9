//! `modset show` — Show one module's resolved section.

use std::path::PathBuf;

use clap::Args;
use modset_common::config::CollectorConfig;
use modset_core::descriptor::ModuleInstall;
use modset_core::profile;
use modset_core::source::{DescriptorSource, FsDescriptorSource};
use serde::Serialize;

use crate::output::{self, OutputFormat};

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Module directory.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Profile to resolve. Defaults to the configured root profile.
    #[arg(long)]
    pub profile: Option<String>,

    /// Resolve only the plain section, ignoring composite keys.
    #[arg(long)]
    pub plain: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    module: &'a str,
    profile: &'a str,
    deps: &'a [String],
    #[serde(flatten)]
    install: ModuleInstall,
}

/// Executes the `show` command.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be loaded.
pub fn execute(args: &ShowArgs, config: &CollectorConfig) -> anyhow::Result<()> {
    let dir = super::module_dir(&args.dir)?;
    let descriptor = FsDescriptorSource::new(config.descriptor_file.as_str()).load(&dir)?;
    let profile_name = args.profile.as_deref().unwrap_or(&config.root_profile);

    let body = if args.plain {
        profile::resolve_plain(&descriptor, profile_name)
    } else {
        profile::resolve(&descriptor, profile_name)
    };
    let report = ShowReport {
        module: descriptor.module(),
        profile: profile_name,
        deps: &body.deps,
        install: ModuleInstall::from_body(descriptor.module(), &body),
    };

    match args.format {
        OutputFormat::Json => println!("{}", output::render_json(&report)?),
        OutputFormat::Text => {
            println!("{} / {}", report.module, report.profile);
            print!("{}", output::render_list("Deps", report.deps));
            print!("{}", output::render_list("Build files", &report.install.build_files));
            print!(
                "{}",
                output::render_list("External modules", &report.install.external_modules)
            );
            print!("{}", output::render_list("Packages", &report.install.packages));
        }
    }
    Ok(())
}

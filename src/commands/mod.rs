// src/commands/mod.rs
//! Command handlers for the boost-kitchen CLI

mod collect;
mod cook;
mod flags;
mod info;

pub use collect::cmd_collect;
pub use cook::cmd_cook;
pub use flags::cmd_flags;
pub use info::{cmd_info, cmd_package_id};

use crate::cli::{Cli, ProfileArgs};
use anyhow::{Context, Result};
use boost_kitchen::Profile;
use clap::CommandFactory;
use clap_complete::Shell;
use tracing::debug;

/// Build the profile from a file (or the host) plus `-s`/`-o` overrides
pub fn load_profile(args: &ProfileArgs) -> Result<Profile> {
    let profile = match &args.profile {
        Some(path) => Profile::load(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None => {
            debug!("No profile given, detecting host settings");
            Profile::detect().context("Failed to detect host settings; pass --profile")?
        }
    };

    profile
        .with_settings(args.settings.iter().map(String::as_str))
        .context("Invalid setting override")?
        .with_options(args.options.iter().map(String::as_str))
        .context("Invalid option override")
}

/// Write completions for `shell` to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "boost-kitchen", &mut std::io::stdout());
    Ok(())
}

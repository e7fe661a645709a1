// src/commands/info.rs

//! Info and package-id commands

use super::load_profile;
use crate::cli::ProfileArgs;
use anyhow::{Context, Result};
use boost_kitchen::recipe::{configure, package_id};
use boost_kitchen::{Kitchen, KitchenConfig};
use std::path::PathBuf;

/// Show libraries and defines a consumer of the package needs
pub fn cmd_info(profile_args: &ProfileArgs, package_dir: PathBuf, json: bool) -> Result<()> {
    let profile = load_profile(profile_args)?;
    let kitchen = Kitchen::new(KitchenConfig {
        package_dir: package_dir.clone(),
        ..Default::default()
    });

    let info = kitchen
        .package_info(&profile)
        .with_context(|| format!("Failed to read package info from {}", package_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("libs:         {}", info.libs.join(" "));
    println!("defines:      {}", info.defines.join(" "));
    println!("include dirs: {}", info.include_dirs.join(" "));
    println!("lib dirs:     {}", info.lib_dirs.join(" "));
    println!("bin dirs:     {}", info.bin_dirs.join(" "));
    Ok(())
}

pub fn cmd_package_id(profile_args: &ProfileArgs) -> Result<()> {
    let profile = configure(&load_profile(profile_args)?);
    println!("{}", package_id(&profile)?);
    Ok(())
}

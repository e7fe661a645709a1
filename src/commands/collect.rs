// src/commands/collect.rs

//! Collect command - link order from an existing build log

use super::load_profile;
use crate::cli::ProfileArgs;
use anyhow::{Context, Result};
use boost_kitchen::recipe::configure;
use boost_kitchen::ArtifactCollector;
use std::path::Path;

pub fn cmd_collect(log: &Path, profile_args: &ProfileArgs, json: bool) -> Result<()> {
    let profile = configure(&load_profile(profile_args)?);
    let collector = ArtifactCollector::for_profile(&profile)?;
    let libraries = collector
        .collect_file(log)
        .with_context(|| format!("Failed to collect libraries from {}", log.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&libraries)?);
    } else {
        for lib in &libraries {
            println!("{}", lib);
        }
    }
    Ok(())
}

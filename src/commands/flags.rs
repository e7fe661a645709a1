// src/commands/flags.rs

//! Flags command - show what would be run for a profile

use super::load_profile;
use crate::cli::ProfileArgs;
use anyhow::Result;
use boost_kitchen::recipe::flags::{b2_command, bootstrap_plan, build_flags, install_args};
use boost_kitchen::recipe::{configure, requirements};
use std::path::Path;

pub fn cmd_flags(profile_args: &ProfileArgs, jobs: u32) -> Result<()> {
    let profile = configure(&load_profile(profile_args)?);
    let settings = &profile.settings;

    let plan = bootstrap_plan(settings, None);
    let mut flags = plan.flags;
    flags.extend(build_flags(&profile));
    let b2 = b2_command(settings, &profile.options, &flags, jobs, None);

    if settings.compiler.name.is_msvc() {
        println!("(commands run after loading vcvarsall)");
    }
    println!("bootstrap: {}", plan.command);
    if profile.options.header_only {
        println!("build:     skipped (header only)");
    } else {
        println!("build:     {}", b2);
        println!(
            "install:   {} {}",
            b2,
            install_args(Path::new("<package>"))
        );
    }

    for requirement in requirements(&profile) {
        println!("requires:  {}", requirement);
    }

    Ok(())
}

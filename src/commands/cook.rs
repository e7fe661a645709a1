// src/commands/cook.rs

//! Cook command - build and package Boost for a profile

use super::load_profile;
use crate::cli::ProfileArgs;
use anyhow::{Context, Result};
use boost_kitchen::recipe::{parse_recipe_file, validate_recipe};
use boost_kitchen::{Kitchen, KitchenConfig, Recipe};
use std::path::PathBuf;
use tracing::info;

/// Cook Boost into a package folder
///
/// # Arguments
/// * `profile_args` - Profile file and overrides
/// * `recipe_path` - Recipe file (built-in recipe when `None`)
/// * `package_dir` - Package folder to populate
/// * `build_dir` - Build directory (temporary when `None`)
/// * `source_cache` - Directory for keeping downloaded archives
/// * `jobs` - Number of parallel b2 jobs (None = auto)
/// * `keep_builddir` - Keep a temporary build directory after completion
/// * `validate_only` - Only validate the recipe, don't cook
/// * `fetch_only` - Only fetch sources, don't build
#[allow(clippy::too_many_arguments)]
pub fn cmd_cook(
    profile_args: &ProfileArgs,
    recipe_path: Option<PathBuf>,
    package_dir: PathBuf,
    build_dir: Option<PathBuf>,
    source_cache: Option<PathBuf>,
    jobs: Option<u32>,
    keep_builddir: bool,
    validate_only: bool,
    fetch_only: bool,
) -> Result<()> {
    let recipe = match &recipe_path {
        Some(path) => {
            println!("Reading recipe: {}", path.display());
            parse_recipe_file(path)
                .with_context(|| format!("Failed to parse recipe: {}", path.display()))?
        }
        None => Recipe::boost(),
    };

    println!("Recipe: {} version {}", recipe.package.name, recipe.package.version);

    let warnings = validate_recipe(&recipe).context("Recipe validation failed")?;
    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    if validate_only {
        println!("Recipe validation passed");
        if warnings.is_empty() {
            println!("[OK] No issues found");
        } else {
            println!("[OK] {} warning(s)", warnings.len());
        }
        return Ok(());
    }

    let mut config = KitchenConfig {
        build_dir,
        package_dir,
        source_cache,
        keep_builddir,
        ..Default::default()
    };
    if let Some(j) = jobs {
        config.jobs = j;
    }

    let kitchen = Kitchen::new(config);

    if fetch_only {
        println!("Fetching sources (fetch-only mode)...");
        let archive = kitchen
            .fetch(&recipe)
            .with_context(|| format!("Failed to fetch sources for {}", recipe.package.name))?;
        println!("\n[COMPLETE] Fetched {}", archive.display());
        return Ok(());
    }

    let profile = load_profile(profile_args)?;
    println!(
        "Cooking for {} {} {} {} with {} parallel jobs...",
        profile.settings.os,
        profile.settings.arch,
        profile.settings.compiler.name,
        profile.settings.compiler.version,
        kitchen.config().jobs
    );

    let result = kitchen
        .cook(&recipe, &profile)
        .with_context(|| format!("Failed to cook {}", recipe.package.name))?;

    println!("\n[COMPLETE] Packaged: {}", result.package_dir.display());
    println!("Package id: {}", result.package_id);
    println!("Libraries ({}):", result.cpp_info.libs.len());
    for lib in &result.cpp_info.libs {
        println!("  {}", lib);
    }
    println!("Defines: {}", result.cpp_info.defines.join(" "));

    if !result.warnings.is_empty() {
        println!("\nBuild warnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    info!(
        "Successfully cooked {} into {}",
        recipe.package.name,
        result.package_dir.display()
    );

    Ok(())
}

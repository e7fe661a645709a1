// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Cook {
            profile,
            recipe,
            package_dir,
            build_dir,
            source_cache,
            jobs,
            keep_builddir,
            validate_only,
            fetch_only,
        } => commands::cmd_cook(
            &profile,
            recipe,
            package_dir,
            build_dir,
            source_cache,
            jobs,
            keep_builddir,
            validate_only,
            fetch_only,
        ),
        Commands::Flags { profile, jobs } => commands::cmd_flags(&profile, jobs),
        Commands::Collect { log, profile, json } => commands::cmd_collect(&log, &profile, json),
        Commands::Info {
            profile,
            package_dir,
            json,
        } => commands::cmd_info(&profile, package_dir, json),
        Commands::PackageId { profile } => commands::cmd_package_id(&profile),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}

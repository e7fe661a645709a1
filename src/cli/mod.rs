// src/cli/mod.rs
//! CLI definitions for boost-kitchen
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `cook` - Fetch, build and package Boost for a profile
//! - `flags` - Show the bootstrap and b2 command lines
//! - `collect` - Read link order from a b2 build log
//! - `info` - Show consumer info for a cooked package
//! - `package-id` - Show the binary package id of a profile
//! - `completions` - Generate shell completions

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boost-kitchen")]
#[command(author = "boost-kitchen contributors")]
#[command(version)]
#[command(about = "Build and package the Boost C++ libraries", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the build profile comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Profile TOML file (detected from the host when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Setting override, e.g. `-s compiler.version=7`
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option override, e.g. `-o shared=True` or `-o without_python=False`
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, build and package Boost
    Cook {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Recipe file (built-in Boost recipe when omitted)
        #[arg(short, long, value_name = "FILE")]
        recipe: Option<PathBuf>,

        /// Package folder receiving include/, lib/ and bin/
        #[arg(long, default_value = "package")]
        package_dir: PathBuf,

        /// Build directory (a temporary directory when omitted)
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Keep downloaded archives here
        #[arg(long)]
        source_cache: Option<PathBuf>,

        /// Parallel b2 jobs (default: available CPUs)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Keep the temporary build directory
        #[arg(long)]
        keep_builddir: bool,

        /// Only validate the recipe
        #[arg(long)]
        validate_only: bool,

        /// Only download and verify the source archive
        #[arg(long, conflicts_with = "validate_only")]
        fetch_only: bool,
    },

    /// Print the bootstrap and b2 command lines for a profile
    Flags {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Parallel b2 jobs shown in the command line
        #[arg(short, long, default_value = "1")]
        jobs: u32,
    },

    /// Collect libraries in link order from a b2 build log
    Collect {
        /// Build log written by `b2 -d2`
        log: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the libraries as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show libraries and defines for a cooked package
    Info {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Package folder holding link_library_list.json
        #[arg(long, default_value = "package")]
        package_dir: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the binary package id of a profile
    PackageId {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

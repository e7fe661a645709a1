// src/recipe/mod.rs

//! Boost recipe: source description, flag derivation and the build lifecycle
//!
//! # Culinary Terminology
//!
//! - **Recipe**: where the sources come from ([`Recipe`])
//! - **Kitchen**: runs the lifecycle for one profile ([`Kitchen`])
//! - **Cook**: one pass through the phases
//! - **Prep**: fetch and extract sources
//! - **Simmer**: bootstrap and build
//! - **Plate**: install, rename, record the link order
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "boost"
//! version = "1.65.1"
//!
//! [source]
//! archive = "https://sourceforge.net/projects/boost/files/boost/%(version)s/%(archive)s/download"
//! checksum = "sha256:a13de2c8fbad635e6ba9c8f8714a0e6b4264b60a29b964b940a22554705b6b60"
//! ```

pub mod buildlog;
pub mod configure;
pub mod flags;
mod format;
mod kitchen;
pub mod package_info;
pub mod parser;

pub use buildlog::{ArtifactCollector, ArtifactRecord, LinkMode};
pub use configure::{configure, package_id, requirements, Requirement};
pub use format::{PackageSection, Recipe, SourceSection, DEFAULT_ARCHIVE_URL, DEFAULT_BOOST_VERSION};
pub use kitchen::{
    msvc_static_name, rename_msvc_static_libs, vcvars_command, Cook, CookResult, Kitchen,
    KitchenConfig,
};
pub use package_info::{package_info, CppInfo, LibraryList, LIBRARY_LIST_FILE};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};

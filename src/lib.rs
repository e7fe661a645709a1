// src/lib.rs

//! boost-kitchen: builds and packages the Boost C++ libraries
//!
//! A [`Profile`] (settings, options, dependency locations) drives every
//! phase. The [`Kitchen`] downloads the sources, bootstraps and runs b2,
//! installs into a package folder and records the link order of the
//! produced libraries by reading the b2 build log.
//!
//! # Architecture
//!
//! - `profile`: settings and options, parsed from TOML or detected
//! - `recipe::flags`: pure mapping from a profile to b2 command lines
//! - `recipe::buildlog`: link-order collection from the build log
//! - `recipe::kitchen`: the side-effecting lifecycle

mod error;
pub mod hash;
pub mod profile;
pub mod recipe;

pub use error::{Error, Result};
pub use profile::{Module, Options, Profile, Settings};
pub use recipe::{
    ArtifactCollector, CookResult, CppInfo, Kitchen, KitchenConfig, LibraryList, LinkMode, Recipe,
};

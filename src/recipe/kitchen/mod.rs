// src/recipe/kitchen/mod.rs

//! Kitchen: runs the Boost lifecycle for one profile
//!
//! Cooking walks the phases in order:
//! - **Configure**: prune options the settings do not allow and list the
//!   compression libraries iostreams needs
//! - **Prep**: download, verify and extract the source archive
//! - **Simmer**: bootstrap b2 and build, capturing the build log
//! - **Plate**: install into the package folder, rename Visual Studio
//!   static libraries and record the link order from the build log
//! - **Package info**: derive libraries and defines for consumers

mod archive;
mod config;
mod cook;
mod rename;
mod toolchain;

pub use config::{CookResult, KitchenConfig};
pub use cook::Cook;
pub use rename::{msvc_static_name, rename_msvc_static_libs};
pub use toolchain::vcvars_command;

use crate::error::{Error, Result};
use crate::hash;
use crate::profile::{Os, Profile};
use crate::recipe::configure::{configure, package_id, requirements};
use crate::recipe::format::Recipe;
use crate::recipe::package_info::{package_info, CppInfo, LibraryList};
use archive::download_file;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
}

impl Kitchen {
    /// Create a new Kitchen with the given configuration
    pub fn new(config: KitchenConfig) -> Self {
        Self { config }
    }

    /// Create a Kitchen with default configuration
    pub fn with_defaults() -> Self {
        Self::new(KitchenConfig::default())
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Cook a recipe for a profile into the configured package folder
    ///
    /// Dependency locations for the compression libraries must be present
    /// in the profile before anything is downloaded.
    pub fn cook(&self, recipe: &Recipe, profile: &Profile) -> Result<CookResult> {
        let configured = configure(profile);
        let package_id = package_id(&configured)?;
        info!(
            "Cooking {} version {} (package {})",
            recipe.package.name,
            recipe.package.version,
            &package_id[..12]
        );

        for requirement in requirements(&configured) {
            info!("Requires {}", requirement);
            configured.dependency(&requirement.name)?;
        }

        let mut cook = Cook::new(self, recipe, &configured)?;

        info!("Prep: fetching source...");
        cook.prep()?;

        info!("Simmering: running build...");
        cook.simmer()?;

        info!("Plating: installing package...");
        let list = cook.plate()?;

        let cpp_info = package_info(&configured, &list);
        info!("LIBRARIES: {:?}", cpp_info.libs);

        Ok(CookResult {
            package_dir: cook.package_dir.clone(),
            package_id,
            libraries: list.libraries,
            cpp_info,
            log: cook.log,
            warnings: cook.warnings,
        })
    }

    /// Consumer info for an already cooked package folder
    pub fn package_info(&self, profile: &Profile) -> Result<CppInfo> {
        let configured = configure(profile);
        let list = LibraryList::load(&self.config.package_dir)?;
        let info = package_info(&configured, &list);
        info!("LIBRARIES: {:?}", info.libs);
        Ok(info)
    }

    /// Download and verify the source archive without building
    ///
    /// The archive lands in the source cache, or the build directory when
    /// no cache is configured, and is kept.
    pub fn fetch(&self, recipe: &Recipe) -> Result<PathBuf> {
        let host = Os::host().ok_or_else(|| {
            Error::InvalidSetting(format!("unsupported host OS '{}'", std::env::consts::OS))
        })?;
        let fallback = self
            .config
            .build_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        self.fetch_source(recipe, host, &fallback)
    }

    /// Fetch the source archive, reusing a verified copy when present
    pub(crate) fn fetch_source(&self, recipe: &Recipe, host: Os, fallback_dir: &Path) -> Result<PathBuf> {
        let dir = self.config.source_cache.as_deref().unwrap_or(fallback_dir);
        fs::create_dir_all(dir)?;

        let filename = recipe.archive_filename(host);
        let path = dir.join(&filename);
        let checksum = recipe.source.checksum.as_deref();

        if path.exists() {
            match checksum {
                Some(expected) => match hash::verify_file(&path, expected) {
                    Ok(()) => {
                        debug!("Using cached source: {}", path.display());
                        return Ok(path);
                    }
                    Err(e) => {
                        warn!("Cached {} is unusable ({}), re-downloading", filename, e);
                        fs::remove_file(&path)?;
                    }
                },
                None => {
                    debug!("Using cached source (unverified): {}", path.display());
                    return Ok(path);
                }
            }
        }

        let url = recipe.archive_url(host);
        info!("Downloading: {}", url);
        let partial = dir.join(format!("{}.part", filename));
        download_file(&url, &partial, self.config.download_timeout)?;

        match checksum {
            Some(expected) => {
                if let Err(e) = hash::verify_file(&partial, expected) {
                    fs::remove_file(&partial)?;
                    return Err(e);
                }
            }
            None => warn!("No checksum for {}, archive not verified", filename),
        }

        fs::rename(&partial, &path)?;
        Ok(path)
    }
}

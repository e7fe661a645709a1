// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen build system

use crate::recipe::package_info::CppInfo;
use std::path::PathBuf;
use std::time::Duration;

/// Kitchen configuration
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Directory the sources are extracted into and b2 runs from
    ///
    /// `None` uses a temporary directory that is removed afterwards
    /// unless `keep_builddir` is set.
    pub build_dir: Option<PathBuf>,
    /// Package folder receiving `include/`, `lib/`, `bin/`
    pub package_dir: PathBuf,
    /// Keep downloaded archives here and reuse them on later runs
    pub source_cache: Option<PathBuf>,
    /// Parallel jobs passed to b2 (`-j`)
    pub jobs: u32,
    /// Keep a temporary build directory after completion
    pub keep_builddir: bool,
    /// HTTP timeout for source downloads
    pub download_timeout: Duration,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            build_dir: None,
            package_dir: PathBuf::from("package"),
            source_cache: None,
            jobs,
            keep_builddir: false,
            download_timeout: Duration::from_secs(600),
        }
    }
}

impl KitchenConfig {
    /// Configuration building in `build_dir` and packaging into `package_dir`
    pub fn with_dirs(build_dir: impl Into<PathBuf>, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: Some(build_dir.into()),
            package_dir: package_dir.into(),
            ..Self::default()
        }
    }
}

/// Result of cooking a recipe
#[derive(Debug)]
pub struct CookResult {
    /// Package folder that was populated
    pub package_dir: PathBuf,
    /// Binary package id of the configured profile
    pub package_id: String,
    /// Libraries in link order, as persisted
    pub libraries: Vec<String>,
    /// Consumer-facing package info
    pub cpp_info: CppInfo,
    /// Captured bootstrap/install output and phase notes
    pub log: String,
    /// Warnings generated during the cook
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_config_default() {
        let config = KitchenConfig::default();
        assert!(config.jobs > 0);
        assert!(config.build_dir.is_none());
        assert!(config.source_cache.is_none());
        assert!(!config.keep_builddir);
    }

    #[test]
    fn test_kitchen_config_with_dirs() {
        let config = KitchenConfig::with_dirs("/tmp/build", "/tmp/pkg");
        assert_eq!(config.build_dir, Some(PathBuf::from("/tmp/build")));
        assert_eq!(config.package_dir, PathBuf::from("/tmp/pkg"));
        assert!(config.jobs > 0);
    }
}

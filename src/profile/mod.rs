// src/profile/mod.rs

//! Build profiles: settings, options and dependency locations
//!
//! A [`Profile`] is the single immutable configuration value every phase
//! works from. It is read from a TOML file (or detected from the host),
//! then adjusted with command-line `key=value` overrides.
//!
//! # Example Profile
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! build_type = "Release"
//!
//! [settings.compiler]
//! name = "gcc"
//! version = "7"
//! libcxx = "libstdc++11"
//!
//! [options]
//! shared = false
//! fPIC = true
//! without = ["mpi", "graph_parallel"]
//!
//! [deps.zlib]
//! version = "1.2.11"
//! include_paths = ["/opt/zlib/include"]
//! lib_paths = ["/opt/zlib/lib"]
//! ```

mod options;
mod settings;

pub use options::{Module, Options};
pub use settings::{Arch, BuildType, Compiler, CompilerKind, Libcxx, Os, Runtime, Settings};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Where a dependency's headers and libraries were installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
    /// Dependency version, used in `project-config.jam`
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub include_paths: Vec<PathBuf>,

    #[serde(default)]
    pub lib_paths: Vec<PathBuf>,
}

/// Settings, options and dependency info for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub settings: Settings,

    #[serde(default)]
    pub options: Options,

    /// Dependency locations keyed by package name (`zlib`, `bzip2`)
    #[serde(default)]
    pub deps: BTreeMap<String, DependencyInfo>,
}

impl Profile {
    /// Create a profile with default options and no dependency info
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            options: Options::default(),
            deps: BTreeMap::new(),
        }
    }

    /// Parse a profile from TOML
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))
    }

    /// Load a profile from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read profile {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Build a profile describing the host system and its default compiler
    pub fn detect() -> Result<Self> {
        Ok(Self::new(detect_settings()?))
    }

    /// Apply `key=value` setting overrides
    pub fn with_settings<'a>(mut self, overrides: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for item in overrides {
            let (key, value) = split_assignment(item)?;
            self.settings.set(key, value)?;
        }
        Ok(self)
    }

    /// Apply `key=value` option overrides
    pub fn with_options<'a>(mut self, overrides: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for item in overrides {
            let (key, value) = split_assignment(item)?;
            self.options.set(key, value)?;
        }
        Ok(self)
    }

    /// Dependency info, or an error naming the missing package
    pub fn dependency(&self, name: &str) -> Result<&DependencyInfo> {
        self.deps.get(name).ok_or_else(|| {
            Error::NotFound(format!(
                "dependency '{}' has no [deps.{}] entry in the profile",
                name, name
            ))
        })
    }
}

fn split_assignment(item: &str) -> Result<(&str, &str)> {
    item.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| Error::ParseError(format!("Expected key=value, got '{}'", item)))
}

fn detect_settings() -> Result<Settings> {
    let os = Os::host().ok_or_else(|| {
        Error::InvalidSetting(format!("unsupported host OS: {}", std::env::consts::OS))
    })?;
    let arch = Arch::host().ok_or_else(|| {
        Error::InvalidSetting(format!("unsupported host arch: {}", std::env::consts::ARCH))
    })?;

    let compiler = match os {
        Os::Windows => Compiler {
            runtime: Some(Runtime::MD),
            ..Compiler::new(CompilerKind::VisualStudio, "15")
        },
        Os::Macos => Compiler {
            libcxx: Some(Libcxx::Libcxx),
            ..Compiler::new(CompilerKind::AppleClang, tool_version("clang")?)
        },
        _ => {
            let mut compiler = Compiler::new(CompilerKind::Gcc, tool_version("gcc")?);
            compiler.libcxx = Some(if compiler.major_version().unwrap_or(0) >= 5 {
                Libcxx::Libstdcxx11
            } else {
                Libcxx::Libstdcxx
            });
            compiler
        }
    };

    debug!("Detected host settings: {} {} {} {}", os, arch, compiler.name, compiler.version);

    Ok(Settings {
        os,
        arch,
        compiler,
        build_type: BuildType::Release,
    })
}

/// Ask a compiler in PATH for its version (`-dumpversion`)
fn tool_version(tool: &str) -> Result<String> {
    let path = which::which(tool)
        .map_err(|e| Error::NotFound(format!("{} not found in PATH: {}", tool, e)))?;

    let output = Command::new(&path)
        .arg("-dumpversion")
        .output()
        .map_err(|e| Error::IoError(format!("Failed to run {} -dumpversion: {}", tool, e)))?;

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(Error::InvalidSetting(format!("{} reported no version", tool)));
    }
    Ok(version)
}

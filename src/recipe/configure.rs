// src/recipe/configure.rs

//! Configuration step: option pruning, requirements and package ids

use crate::error::Result;
use crate::hash::sha256_hex;
use crate::profile::{Module, Os, Profile};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// zlib release required by iostreams
pub const ZLIB_VERSION: &str = "1.2.11";

/// bzip2 release required by iostreams on Linux and macOS
pub const BZIP2_VERSION: &str = "1.0.6";

/// A package this build depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    /// Link mode the dependency must be built with
    pub shared: bool,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({})",
            self.name,
            self.version,
            if self.shared { "shared" } else { "static" }
        )
    }
}

/// Resolve the effective profile for a build
///
/// - Visual Studio has no `fPIC` option.
/// - Visual Studio with a static (`MT*`) runtime cannot build shared
///   libraries; `shared` is forced off.
/// - Header-only packages have no `shared`, `fPIC` or `python` option.
pub fn configure(profile: &Profile) -> Profile {
    let mut configured = profile.clone();
    let settings = &configured.settings;

    if settings.compiler.name.is_msvc() {
        configured.options.fpic = None;

        let static_runtime = settings.compiler.runtime.is_some_and(|r| r.is_static());
        if static_runtime && configured.options.shared() {
            debug!("Static runtime requested, forcing shared=False");
            configured.options.shared = Some(false);
        }
    }

    if configured.options.header_only {
        configured.options.shared = None;
        configured.options.fpic = None;
        configured.options.python = None;
    }

    configured
}

/// Whether iostreams will be compiled (and needs its compression libraries)
pub fn needs_compression_libs(profile: &Profile) -> bool {
    !profile.options.is_disabled(Module::Iostreams) && !profile.options.header_only
}

/// Packages the build depends on, for an already configured profile
pub fn requirements(profile: &Profile) -> Vec<Requirement> {
    let mut reqs = Vec::new();
    if !needs_compression_libs(profile) {
        return reqs;
    }

    let shared = profile.options.shared();
    if matches!(profile.settings.os, Os::Linux | Os::Macos) {
        reqs.push(Requirement {
            name: "bzip2".to_string(),
            version: BZIP2_VERSION.to_string(),
            shared,
        });
    }
    reqs.push(Requirement {
        name: "zlib".to_string(),
        version: ZLIB_VERSION.to_string(),
        shared,
    });
    reqs
}

#[derive(Serialize)]
struct PackageIdInput<'a> {
    settings: &'a crate::profile::Settings,
    options: &'a crate::profile::Options,
}

/// Identifier of the binary package a configured profile produces
///
/// Header-only packages do not depend on settings or options, so they all
/// share one id.
pub fn package_id(profile: &Profile) -> Result<String> {
    if profile.options.header_only {
        return Ok(sha256_hex(b"header_only"));
    }

    let input = PackageIdInput {
        settings: &profile.settings,
        options: &profile.options,
    };
    let canonical = serde_json::to_vec(&input)?;
    Ok(sha256_hex(&canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Arch, BuildType, Compiler, CompilerKind, Runtime, Settings};

    fn linux_gcc() -> Profile {
        Profile::new(Settings {
            os: Os::Linux,
            arch: Arch::X86_64,
            compiler: Compiler::new(CompilerKind::Gcc, "7"),
            build_type: BuildType::Release,
        })
    }

    fn msvc(runtime: Runtime) -> Profile {
        Profile::new(Settings {
            os: Os::Windows,
            arch: Arch::X86_64,
            compiler: Compiler {
                runtime: Some(runtime),
                ..Compiler::new(CompilerKind::VisualStudio, "15")
            },
            build_type: BuildType::Release,
        })
    }

    #[test]
    fn test_msvc_drops_fpic() {
        let configured = configure(&msvc(Runtime::MD));
        assert_eq!(configured.options.fpic, None);
        assert_eq!(configured.options.shared, Some(false));
    }

    #[test]
    fn test_msvc_static_runtime_forces_static() {
        let mut profile = msvc(Runtime::MTd);
        profile.options.shared = Some(true);
        assert!(!configure(&profile).options.shared());

        let mut profile = msvc(Runtime::MD);
        profile.options.shared = Some(true);
        assert!(configure(&profile).options.shared());
    }

    #[test]
    fn test_header_only_removes_options() {
        let mut profile = linux_gcc();
        profile.options.header_only = true;
        profile.options.fpic = Some(true);
        let configured = configure(&profile);
        assert_eq!(configured.options.shared, None);
        assert_eq!(configured.options.fpic, None);
        assert_eq!(configured.options.python, None);
        assert!(requirements(&configured).is_empty());
    }

    #[test]
    fn test_requirements() {
        let mut profile = linux_gcc();
        profile.options.shared = Some(true);
        let reqs = requirements(&configure(&profile));
        let names: Vec<_> = reqs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bzip2", "zlib"]);
        assert!(reqs.iter().all(|r| r.shared));

        let reqs = requirements(&configure(&msvc(Runtime::MD)));
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].to_string(), "zlib/1.2.11 (static)");

        let mut profile = linux_gcc();
        profile.options.without.insert(Module::Iostreams);
        assert!(requirements(&configure(&profile)).is_empty());
    }

    #[test]
    fn test_package_id() {
        let base = package_id(&linux_gcc()).unwrap();
        assert_eq!(base, package_id(&linux_gcc()).unwrap());
        assert_eq!(base.len(), 64);

        let mut shared = linux_gcc();
        shared.options.shared = Some(true);
        assert_ne!(base, package_id(&shared).unwrap());

        let mut header_gcc = linux_gcc();
        header_gcc.options.header_only = true;
        let mut header_msvc = msvc(Runtime::MT);
        header_msvc.options.header_only = true;
        assert_eq!(
            package_id(&configure(&header_gcc)).unwrap(),
            package_id(&configure(&header_msvc)).unwrap()
        );
    }
}

// src/recipe/package_info.rs

//! Library list record and consumer-facing package info
//!
//! The package phase writes the collected library list to
//! `link_library_list.json` inside the package folder:
//!
//! ```json
//! {"format": 1, "libraries": ["boost_filesystem", "boost_system"]}
//! ```
//!
//! The package-info phase reads it back and derives what consumers link
//! against and which preprocessor defines they need.

use crate::error::{Error, Result};
use crate::profile::{Os, Profile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the record inside the package folder
pub const LIBRARY_LIST_FILE: &str = "link_library_list.json";

/// Current record format
pub const LIBRARY_LIST_FORMAT: u32 = 1;

/// Ordered library list handed from the package phase to package info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryList {
    pub format: u32,
    pub libraries: Vec<String>,
}

impl LibraryList {
    pub fn new(libraries: Vec<String>) -> Self {
        Self {
            format: LIBRARY_LIST_FORMAT,
            libraries,
        }
    }

    /// Record location inside a package folder
    pub fn path_in(package_dir: &Path) -> PathBuf {
        package_dir.join(LIBRARY_LIST_FILE)
    }

    /// Write the record into a package folder
    pub fn save(&self, package_dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(package_dir);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!("Wrote {} libraries to {}", self.libraries.len(), path.display());
        Ok(path)
    }

    /// Read the record from a package folder
    pub fn load(package_dir: &Path) -> Result<Self> {
        let path = Self::path_in(package_dir);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        let list: Self = serde_json::from_str(&content)?;
        if list.format != LIBRARY_LIST_FORMAT {
            return Err(Error::ParseError(format!(
                "Unsupported library list format {} in {}",
                list.format,
                path.display()
            )));
        }
        Ok(list)
    }
}

/// What a consumer of the package needs to compile and link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CppInfo {
    /// Libraries in link order
    pub libs: Vec<String>,
    /// Preprocessor definitions
    pub defines: Vec<String>,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub bin_dirs: Vec<String>,
}

/// Consumer info for a configured profile and its persisted library list
pub fn package_info(profile: &Profile, list: &LibraryList) -> CppInfo {
    let options = &profile.options;
    let settings = &profile.settings;
    let mut info = CppInfo {
        libs: list.libraries.clone(),
        include_dirs: vec!["include".to_string()],
        lib_dirs: vec!["lib".to_string()],
        bin_dirs: vec!["bin".to_string()],
        ..CppInfo::default()
    };

    if !options.header_only && !options.shared() && settings.os == Os::Linux {
        info.libs.push("pthread".to_string());
    }

    if !options.header_only && options.shared() {
        info.defines.push("BOOST_ALL_DYN_LINK".to_string());
    } else {
        info.defines.push("BOOST_USE_STATIC_LIBS".to_string());
    }

    if !options.header_only {
        if options.python() && !options.shared() {
            info.defines.push("BOOST_PYTHON_STATIC_LIB".to_string());
        }

        // Auto-linking would pick library names that the rename step changed
        if settings.compiler.name.is_msvc() {
            info.defines.push("BOOST_ALL_NO_LIB".to_string());
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Arch, BuildType, Compiler, CompilerKind, Runtime, Settings};
    use tempfile::TempDir;

    fn profile(os: Os, compiler: Compiler) -> Profile {
        Profile::new(Settings {
            os,
            arch: Arch::X86_64,
            compiler,
            build_type: BuildType::Release,
        })
    }

    fn libs(names: &[&str]) -> LibraryList {
        LibraryList::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let list = libs(&["boost_filesystem", "boost_system"]);
        let path = list.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(LIBRARY_LIST_FILE));
        assert_eq!(LibraryList::load(dir.path()).unwrap(), list);
    }

    #[test]
    fn test_load_missing_or_wrong_format() {
        let dir = TempDir::new().unwrap();
        assert!(LibraryList::load(dir.path()).is_err());

        fs::write(
            dir.path().join(LIBRARY_LIST_FILE),
            r#"{"format": 99, "libraries": []}"#,
        )
        .unwrap();
        assert!(LibraryList::load(dir.path()).is_err());
    }

    #[test]
    fn test_static_linux_info() {
        let info = package_info(
            &profile(Os::Linux, Compiler::new(CompilerKind::Gcc, "7")),
            &libs(&["boost_system"]),
        );
        assert_eq!(info.libs, vec!["boost_system", "pthread"]);
        assert_eq!(info.defines, vec!["BOOST_USE_STATIC_LIBS"]);
    }

    #[test]
    fn test_shared_info() {
        let mut p = profile(Os::Linux, Compiler::new(CompilerKind::Gcc, "7"));
        p.options.shared = Some(true);
        p.options.python = Some(true);
        let info = package_info(&p, &libs(&["boost_system"]));
        assert_eq!(info.libs, vec!["boost_system"]);
        assert_eq!(info.defines, vec!["BOOST_ALL_DYN_LINK"]);
    }

    #[test]
    fn test_msvc_static_python_info() {
        let compiler = Compiler {
            runtime: Some(Runtime::MD),
            ..Compiler::new(CompilerKind::VisualStudio, "15")
        };
        let mut p = profile(Os::Windows, compiler);
        p.options.python = Some(true);
        let info = package_info(&p, &libs(&[]));
        assert!(info.libs.is_empty());
        assert_eq!(
            info.defines,
            vec!["BOOST_USE_STATIC_LIBS", "BOOST_PYTHON_STATIC_LIB", "BOOST_ALL_NO_LIB"]
        );
    }

    #[test]
    fn test_header_only_info() {
        let mut p = profile(Os::Macos, Compiler::new(CompilerKind::AppleClang, "9.0"));
        p.options.header_only = true;
        p.options.shared = None;
        let info = package_info(&p, &libs(&[]));
        assert!(info.libs.is_empty());
        assert_eq!(info.defines, vec!["BOOST_USE_STATIC_LIBS"]);
    }

    #[test]
    fn test_header_only_linux_has_no_libs() {
        let mut p = profile(Os::Linux, Compiler::new(CompilerKind::Gcc, "7"));
        p.options.header_only = true;
        p.options.shared = None;
        let info = package_info(&p, &libs(&[]));
        assert!(info.libs.is_empty());
        assert_eq!(info.defines, vec!["BOOST_USE_STATIC_LIBS"]);
    }
}

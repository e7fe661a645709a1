// src/recipe/kitchen/rename.rs

//! Library renaming for Visual Studio static packages
//!
//! b2 names static MSVC libraries `libboost_system-vc141-mt-s-1_65_1.lib`.
//! CMake's FindBoost looks for `boost_system-vc141-mt-1_65_1.lib`, so the
//! `lib` prefix and the `s` runtime tag are dropped.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// New name for a library file; `is_file` gates the `lib` prefix strip
pub fn msvc_static_name(name: &str, is_file: bool) -> String {
    let mut new_name = name.to_string();
    if is_file && let Some(stripped) = new_name.strip_prefix("lib") {
        new_name = stripped.to_string();
    }

    if name.contains("-s-") {
        new_name = new_name.replace("-s-", "-");
    } else if name.contains("-sgd-") {
        new_name = new_name.replace("-sgd-", "-gd-");
    }
    new_name
}

/// Rename every entry of `lib_dir`, returning the (old, new) pairs applied
pub fn rename_msvc_static_libs(lib_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut renames = Vec::new();
    for entry in fs::read_dir(lib_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let is_file = entry.path().is_file();
        let new_name = msvc_static_name(&name, is_file);
        if new_name != name {
            renames.push((entry.path(), lib_dir.join(new_name)));
        }
    }

    renames.sort();
    for (original, new) in &renames {
        info!("Rename: {} => {}", original.display(), new.display());
        fs::rename(original, new)?;
    }

    Ok(renames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_msvc_static_name() {
        assert_eq!(
            msvc_static_name("libboost_system-vc141-mt-s-1_65_1.lib", true),
            "boost_system-vc141-mt-1_65_1.lib"
        );
        assert_eq!(
            msvc_static_name("libboost_system-vc141-mt-sgd-1_65_1.lib", true),
            "boost_system-vc141-mt-gd-1_65_1.lib"
        );
        assert_eq!(
            msvc_static_name("libboost_system-vc141-mt-1_65_1.lib", true),
            "boost_system-vc141-mt-1_65_1.lib"
        );
        assert_eq!(msvc_static_name("libcmake", false), "libcmake");
        assert_eq!(msvc_static_name("boost_x.lib", true), "boost_x.lib");
    }

    #[test]
    fn test_rename_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("libboost_regex-vc141-mt-s-1_65_1.lib"), b"").unwrap();
        fs::write(dir.path().join("boost_x.lib"), b"").unwrap();
        fs::create_dir(dir.path().join("libcmake")).unwrap();

        let renames = rename_msvc_static_libs(dir.path()).unwrap();
        assert_eq!(renames.len(), 1);
        assert!(dir.path().join("boost_regex-vc141-mt-1_65_1.lib").exists());
        assert!(dir.path().join("boost_x.lib").exists());
        assert!(dir.path().join("libcmake").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("store");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("real.lib"), b"").unwrap();
        let lib_dir = dir.path().join("lib");
        fs::create_dir(&lib_dir).unwrap();
        std::os::unix::fs::symlink(
            target.join("real.lib"),
            lib_dir.join("libboost_regex-vc141-mt-s-1_65_1.lib"),
        )
        .unwrap();

        rename_msvc_static_libs(&lib_dir).unwrap();
        assert!(lib_dir.join("boost_regex-vc141-mt-1_65_1.lib").exists());
    }
}
